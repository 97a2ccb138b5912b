use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::advisory::{
    AdvisorSession, AdvisorSettings, AdvisoryEntry, ClientId, MatchAdvisor, MemorySessionStore,
    SessionStore, StoreError,
};
use crate::matching::{
    BudgetRange, ClientPreferences, ListingId, MatchEngine, PropertyListing, PropertyType,
};
use crate::narrative::{NarrativeError, NarrativeFuture, NarrativeGenerator, NarrativePrompt};

pub(super) const BILLION: u64 = 1_000_000_000;

pub(super) fn preferences() -> ClientPreferences {
    ClientPreferences {
        budget: BudgetRange::new(3 * BILLION, 6 * BILLION),
        locations: BTreeSet::from(["Quận 9".to_string()]),
        property_types: BTreeSet::from([PropertyType::Apartment]),
        min_area: Some(70.0),
        bedrooms: None,
    }
}

fn listing(
    id: &str,
    price: u64,
    location: &str,
    property_type: PropertyType,
    area: f64,
) -> PropertyListing {
    PropertyListing {
        id: ListingId::from(id),
        title: format!("Listing {id}"),
        price,
        location: location.to_string(),
        property_type,
        area,
        bedrooms: None,
        features: BTreeSet::new(),
    }
}

pub(super) fn candidates() -> Vec<PropertyListing> {
    vec![
        listing("B", 20 * BILLION, "Đồng Nai", PropertyType::Villa, 50.0),
        listing(
            "A",
            4 * BILLION,
            "Quận 9, TP.HCM",
            PropertyType::Apartment,
            80.0,
        ),
        listing("C", 5 * BILLION, "Quận 7, TP.HCM", PropertyType::House, 60.0),
    ]
}

pub(super) fn client(raw: &str) -> ClientId {
    ClientId::parse(raw).expect("valid client id")
}

pub(super) fn settings(timeout: Duration) -> AdvisorSettings {
    AdvisorSettings { top_n: 3, timeout }
}

pub(super) fn advisor_with(
    narrator: Arc<dyn NarrativeGenerator>,
    store: Arc<dyn SessionStore>,
    timeout: Duration,
) -> MatchAdvisor {
    MatchAdvisor::new(MatchEngine::default(), narrator, store, settings(timeout))
}

pub(super) fn advisor(narrator: Arc<dyn NarrativeGenerator>) -> MatchAdvisor {
    advisor_with(
        narrator,
        Arc::new(MemorySessionStore::new()),
        Duration::from_secs(5),
    )
}

/// Returns fixed text and remembers every prompt it was given.
#[derive(Default)]
pub(super) struct ScriptedNarrator {
    prompts: Mutex<Vec<NarrativePrompt>>,
}

impl ScriptedNarrator {
    pub(super) fn prompts(&self) -> Vec<NarrativePrompt> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

impl NarrativeGenerator for ScriptedNarrator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate<'a>(&'a self, prompt: &'a NarrativePrompt) -> NarrativeFuture<'a> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.clone());
        Box::pin(async { Ok("Show listing A first.".to_string()) })
    }
}

pub(super) struct FailingNarrator;

impl NarrativeGenerator for FailingNarrator {
    fn name(&self) -> &str {
        "failing"
    }

    fn generate<'a>(&'a self, _prompt: &'a NarrativePrompt) -> NarrativeFuture<'a> {
        Box::pin(async {
            Err(NarrativeError::Status {
                provider: "Test",
                status: 503,
                body: "overloaded".to_string(),
            })
        })
    }
}

/// Never answers within any reasonable timeout.
#[derive(Default)]
pub(super) struct StalledNarrator {
    calls: AtomicUsize,
}

impl StalledNarrator {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NarrativeGenerator for StalledNarrator {
    fn name(&self) -> &str {
        "stalled"
    }

    fn generate<'a>(&'a self, _prompt: &'a NarrativePrompt) -> NarrativeFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        })
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn load(&self, _client_id: &ClientId) -> Result<Option<AdvisorSession>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn save(&self, _session: AdvisorSession) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn append(
        &self,
        _client_id: &ClientId,
        _entry: AdvisoryEntry,
    ) -> Result<AdvisorSession, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
