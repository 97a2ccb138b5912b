use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::service::{AdvisoryReport, MatchAdvisor};
use super::session::{AdvisorSession, ClientId};
use crate::catalog::{Catalog, CatalogImportError, ListingDraft, PreferencesDraft};
use crate::error::AppError;
use crate::matching::ScoredMatch;

/// Shared state for the matching and advisory endpoints.
#[derive(Clone)]
pub struct AdvisoryState {
    pub advisor: Arc<MatchAdvisor>,
    /// Inventory used when a request carries no candidates of its own.
    pub catalog: Arc<Catalog>,
}

impl AdvisoryState {
    pub fn new(advisor: Arc<MatchAdvisor>, catalog: Arc<Catalog>) -> Self {
        Self { advisor, catalog }
    }

    fn candidates(&self, drafts: Option<Vec<ListingDraft>>) -> Result<Arc<Catalog>, AppError> {
        match drafts {
            Some(drafts) => {
                let catalog = Catalog::from_drafts(drafts).map_err(CatalogImportError::from)?;
                Ok(Arc::new(catalog))
            }
            None => Ok(Arc::clone(&self.catalog)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub preferences: PreferencesDraft,
    #[serde(default)]
    pub candidates: Option<Vec<ListingDraft>>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub candidate_count: usize,
    pub matches: Vec<ScoredMatch>,
}

#[derive(Debug, Deserialize)]
pub struct AdvisoryRequest {
    #[serde(default)]
    pub client_id: Option<String>,
    pub preferences: PreferencesDraft,
    #[serde(default)]
    pub candidates: Option<Vec<ListingDraft>>,
}

pub fn advisory_router(state: AdvisoryState) -> Router {
    Router::new()
        .route("/api/v1/matches", post(match_handler))
        .route("/api/v1/advisory", post(advisory_handler))
        .route("/api/v1/sessions/:client_id", get(session_handler))
        .with_state(state)
}

pub(crate) async fn match_handler(
    State(state): State<AdvisoryState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let preferences = request.preferences.validate()?;
    let catalog = state.candidates(request.candidates)?;
    let matches = state.advisor.rank(&preferences, catalog.listings());

    Ok(Json(MatchResponse {
        candidate_count: catalog.len(),
        matches,
    }))
}

pub(crate) async fn advisory_handler(
    State(state): State<AdvisoryState>,
    Json(request): Json<AdvisoryRequest>,
) -> Result<Json<AdvisoryReport>, AppError> {
    let preferences = request.preferences.validate()?;
    let catalog = state.candidates(request.candidates)?;

    let report = match request.client_id {
        Some(raw) => {
            let client_id = ClientId::parse(&raw)?;
            state
                .advisor
                .advise_for_client(&client_id, &preferences, catalog.listings())
                .await?
        }
        None => {
            state
                .advisor
                .advise(&preferences, catalog.listings())
                .await
        }
    };

    Ok(Json(report))
}

pub(crate) async fn session_handler(
    State(state): State<AdvisoryState>,
    Path(client_id): Path<String>,
) -> Result<Json<AdvisorSession>, AppError> {
    let client_id = ClientId::parse(&client_id)?;
    let session = state.advisor.session(&client_id)?;
    Ok(Json(session))
}
