//! Advisory workflow: ranking plus narrative commentary, with per-client session history.
//!
//! The narrative step is bounded by a single timeout and never blocks delivery of the
//! ranking. Sessions go through the [`SessionStore`] port so the HTTP layer and tests can
//! swap memory and file-backed storage.

mod file_store;
pub mod router;
mod service;
mod session;

#[cfg(test)]
mod tests;

pub use file_store::JsonFileSessionStore;
pub use router::{advisory_router, AdvisoryState};
pub use service::{AdvisorError, AdvisorSettings, Advisory, AdvisoryReport, MatchAdvisor};
pub use session::{
    AdvisorSession, AdvisoryEntry, ClientId, MatchSummary, MemorySessionStore, SessionStore,
    StoreError, HISTORY_LIMIT,
};
