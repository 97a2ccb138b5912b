use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::session::{
    AdvisorSession, AdvisoryEntry, ClientId, MatchSummary, SessionStore, StoreError,
};
use crate::config::NarrativeConfig;
use crate::matching::{ClientPreferences, MatchEngine, PropertyListing, ReasonLocale, ScoredMatch};
use crate::narrative::{NarrativeError, NarrativeGenerator, NarrativePrompt};

/// Tuning for the narrative step of an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisorSettings {
    /// Matches embedded in the prompt.
    pub top_n: usize,
    /// Single bounded wait for the generator.
    pub timeout: Duration,
}

impl AdvisorSettings {
    pub fn from_config(config: &NarrativeConfig) -> Self {
        Self {
            top_n: config.top_n,
            timeout: config.timeout,
        }
    }
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            top_n: NarrativeConfig::DEFAULT_TOP_N,
            timeout: Duration::from_millis(NarrativeConfig::DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Outcome of the narrative step. The ranking is delivered either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Advisory {
    Generated { provider: String, text: String },
    Unavailable { reason: String, fallback: String },
}

impl Advisory {
    fn unavailable(error: &NarrativeError, locale: ReasonLocale) -> Self {
        let fallback = match locale {
            ReasonLocale::English => {
                "Advisor commentary is unavailable right now. The ranked listings are complete \
                 and can be presented as they are."
            }
            ReasonLocale::Vietnamese => {
                "Tư vấn AI tạm thời không khả dụng. Danh sách BĐS đã xếp hạng vẫn đầy đủ \
                 và có thể gửi cho khách hàng."
            }
        };
        Advisory::Unavailable {
            reason: error.to_string(),
            fallback: fallback.to_string(),
        }
    }

    /// Text to show the agent: the generated prose or the fallback placeholder.
    pub fn text(&self) -> &str {
        match self {
            Advisory::Generated { text, .. } => text,
            Advisory::Unavailable { fallback, .. } => fallback,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Advisory::Generated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryReport {
    pub matches: Vec<ScoredMatch>,
    pub advisory: Advisory,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no advisor session for client {0}")]
    SessionNotFound(ClientId),
}

/// Ranks candidates, asks the narrative generator for commentary, and records per-client
/// history.
pub struct MatchAdvisor {
    engine: MatchEngine,
    narrator: Arc<dyn NarrativeGenerator>,
    store: Arc<dyn SessionStore>,
    settings: AdvisorSettings,
}

impl MatchAdvisor {
    pub fn new(
        engine: MatchEngine,
        narrator: Arc<dyn NarrativeGenerator>,
        store: Arc<dyn SessionStore>,
        settings: AdvisorSettings,
    ) -> Self {
        Self {
            engine,
            narrator,
            store,
            settings,
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn settings(&self) -> &AdvisorSettings {
        &self.settings
    }

    pub fn narrator_name(&self) -> &str {
        self.narrator.name()
    }

    /// Ranking only, no narrative call.
    pub fn rank(
        &self,
        preferences: &ClientPreferences,
        candidates: &[PropertyListing],
    ) -> Vec<ScoredMatch> {
        let ranked = self.engine.rank(preferences, candidates);
        debug!(
            candidates = candidates.len(),
            matches = ranked.len(),
            "listings scored"
        );
        ranked
    }

    pub async fn advise(
        &self,
        preferences: &ClientPreferences,
        candidates: &[PropertyListing],
    ) -> AdvisoryReport {
        let matches = self.rank(preferences, candidates);
        let advisory = self.narrate(preferences, &matches, candidates.len()).await;

        AdvisoryReport {
            matches,
            advisory,
            generated_at: Utc::now(),
        }
    }

    /// Advise and append the outcome to the client's session.
    pub async fn advise_for_client(
        &self,
        client_id: &ClientId,
        preferences: &ClientPreferences,
        candidates: &[PropertyListing],
    ) -> Result<AdvisoryReport, AdvisorError> {
        let report = self.advise(preferences, candidates).await;

        let entry = AdvisoryEntry {
            recorded_at: report.generated_at,
            preferences: preferences.clone(),
            top_matches: report
                .matches
                .iter()
                .take(self.settings.top_n)
                .map(MatchSummary::from)
                .collect(),
            advisory: report.advisory.clone(),
        };
        let session = self.store.append(client_id, entry)?;
        debug!(
            client_id = %client_id,
            entries = session.history.len(),
            "advisory recorded"
        );

        Ok(report)
    }

    pub fn session(&self, client_id: &ClientId) -> Result<AdvisorSession, AdvisorError> {
        self.store
            .load(client_id)?
            .ok_or_else(|| AdvisorError::SessionNotFound(client_id.clone()))
    }

    async fn narrate(
        &self,
        preferences: &ClientPreferences,
        matches: &[ScoredMatch],
        candidate_count: usize,
    ) -> Advisory {
        let locale = self.engine.config().locale;
        let prompt = NarrativePrompt::for_matches(
            preferences,
            matches,
            candidate_count,
            self.settings.top_n,
            locale,
        );

        let outcome =
            match tokio::time::timeout(self.settings.timeout, self.narrator.generate(&prompt))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(NarrativeError::Timeout(self.settings.timeout)),
            };

        match outcome {
            Ok(text) => {
                info!(
                    provider = self.narrator.name(),
                    matches = matches.len(),
                    "advisory generated"
                );
                Advisory::Generated {
                    provider: self.narrator.name().to_string(),
                    text,
                }
            }
            Err(error) => {
                warn!(
                    provider = self.narrator.name(),
                    error = %error,
                    "advisory unavailable, returning ranking with fallback text"
                );
                Advisory::unavailable(&error, locale)
            }
        }
    }
}
