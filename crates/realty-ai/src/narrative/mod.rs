//! Advisory prose from an external text-generation service.
//!
//! The match engine never depends on these adapters; callers hand them a prompt built from
//! a ranking and treat whatever comes back as opaque text.

mod canned;
mod gemini;
mod http_client;
mod openai;
mod prompt;

pub use canned::CannedNarrator;
pub use gemini::GeminiNarrator;
pub use openai::OpenAiNarrator;
pub use prompt::NarrativePrompt;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{NarrativeConfig, NarrativeProviderKind};

pub type NarrativeFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, NarrativeError>> + Send + 'a>>;

/// Text-generation collaborator turning a prompt into free-form advice.
pub trait NarrativeGenerator: Send + Sync {
    /// Provider identifier (e.g. "openai", "gemini").
    fn name(&self) -> &str;

    fn generate<'a>(&'a self, prompt: &'a NarrativePrompt) -> NarrativeFuture<'a>;
}

/// Failure modes of a narrative call. None of them are fatal to a ranking.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("{provider} API key is not configured")]
    MissingApiKey { provider: &'static str },
    #[error("narrative request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{provider} API returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("{provider} API returned no text")]
    EmptyResponse { provider: &'static str },
    #[error("narrative generation timed out after {0:?}")]
    Timeout(Duration),
}

const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo-preview";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Build the generator selected by configuration.
///
/// `Auto` prefers OpenAI, then Gemini, and falls back to the offline responder when neither
/// key is present.
pub fn from_config(config: &NarrativeConfig) -> Arc<dyn NarrativeGenerator> {
    let kind = match config.provider {
        NarrativeProviderKind::Auto if config.openai_api_key.is_some() => {
            NarrativeProviderKind::OpenAi
        }
        NarrativeProviderKind::Auto if config.gemini_api_key.is_some() => {
            NarrativeProviderKind::Gemini
        }
        NarrativeProviderKind::Auto => NarrativeProviderKind::Canned,
        explicit => explicit,
    };

    let generator: Arc<dyn NarrativeGenerator> = match kind {
        NarrativeProviderKind::OpenAi => Arc::new(
            OpenAiNarrator::new(
                config.openai_api_key.as_deref(),
                config.model.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL),
            )
            .with_base_url(&config.openai_base_url)
            .with_timeout(config.timeout),
        ),
        NarrativeProviderKind::Gemini => Arc::new(
            GeminiNarrator::new(
                config.gemini_api_key.as_deref(),
                config.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL),
            )
            .with_base_url(&config.gemini_base_url)
            .with_timeout(config.timeout),
        ),
        NarrativeProviderKind::Canned | NarrativeProviderKind::Auto => {
            Arc::new(CannedNarrator)
        }
    };

    info!(provider = generator.name(), "narrative generator selected");
    generator
}
