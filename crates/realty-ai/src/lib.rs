//! Property matching and advisory engine for real-estate sales pipelines.

pub mod advisory;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matching;
pub mod narrative;
pub mod telemetry;
