use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::service::Advisory;
use crate::matching::{ClientPreferences, ListingId, ScoredMatch};

/// Sessions keep this many advisories; older entries are dropped first.
pub const HISTORY_LIMIT: usize = 20;

/// Identifier of a lead or client the agent is advising.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidClientId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File-system safe form. `[A-Za-z0-9_-]` is kept and every other byte becomes `%XX`,
    /// so distinct ids never share a file.
    pub fn file_stem(&self) -> String {
        let mut stem = String::with_capacity(self.0.len());
        for byte in self.0.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
                stem.push(char::from(byte));
            } else {
                stem.push_str(&format!("%{byte:02X}"));
            }
        }
        stem
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listing id and score as recorded in a session, without the full listing body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub listing_id: ListingId,
    pub score: u32,
}

impl From<&ScoredMatch> for MatchSummary {
    fn from(scored: &ScoredMatch) -> Self {
        Self {
            listing_id: scored.listing.id.clone(),
            score: scored.score,
        }
    }
}

/// One advisory produced for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryEntry {
    pub recorded_at: DateTime<Utc>,
    pub preferences: ClientPreferences,
    pub top_matches: Vec<MatchSummary>,
    pub advisory: Advisory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSession {
    pub client_id: ClientId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub history: Vec<AdvisoryEntry>,
}

impl AdvisorSession {
    pub fn new(client_id: ClientId, now: DateTime<Utc>) -> Self {
        Self {
            client_id,
            created_at: now,
            updated_at: now,
            history: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: AdvisoryEntry) {
        self.updated_at = entry.recorded_at;
        self.history.push(entry);
        if self.history.len() > HISTORY_LIMIT {
            let overflow = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..overflow);
        }
    }

    pub fn latest(&self) -> Option<&AdvisoryEntry> {
        self.history.last()
    }
}

/// Persistence port for advisor sessions.
pub trait SessionStore: Send + Sync {
    fn load(&self, client_id: &ClientId) -> Result<Option<AdvisorSession>, StoreError>;
    fn save(&self, session: AdvisorSession) -> Result<(), StoreError>;

    /// Record `entry` in the client's session, creating it when absent. Load, record and
    /// save happen as one step per store, so concurrent appends are never lost.
    fn append(
        &self,
        client_id: &ClientId,
        entry: AdvisoryEntry,
    ) -> Result<AdvisorSession, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid client id {0:?}")]
    InvalidClientId(String),
    #[error("session storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store; sessions vanish on restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<ClientId, AdvisorSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, client_id: &ClientId) -> Result<Option<AdvisorSession>, StoreError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".to_string()))?;
        Ok(guard.get(client_id).cloned())
    }

    fn save(&self, session: AdvisorSession) -> Result<(), StoreError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".to_string()))?;
        guard.insert(session.client_id.clone(), session);
        Ok(())
    }

    fn append(
        &self,
        client_id: &ClientId,
        entry: AdvisoryEntry,
    ) -> Result<AdvisorSession, StoreError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".to_string()))?;
        let session = guard
            .entry(client_id.clone())
            .or_insert_with(|| AdvisorSession::new(client_id.clone(), entry.recorded_at));
        session.record(entry);
        Ok(session.clone())
    }
}
