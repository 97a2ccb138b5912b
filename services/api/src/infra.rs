use metrics_exporter_prometheus::PrometheusHandle;
use realty_ai::advisory::{
    AdvisorSettings, JsonFileSessionStore, MatchAdvisor, MemorySessionStore, SessionStore,
};
use realty_ai::catalog::{Catalog, CatalogImporter, PreferencesDraft};
use realty_ai::config::{AppConfig, NarrativeConfig};
use realty_ai::error::AppError;
use realty_ai::matching::{ClientPreferences, MatchEngine, MatchingConfig, ReasonLocale};
use realty_ai::narrative;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the advisor from configuration: engine, narrative provider and session store.
pub(crate) fn build_advisor(
    matching: MatchingConfig,
    narrative_config: &NarrativeConfig,
    session_dir: Option<&Path>,
) -> Result<MatchAdvisor, AppError> {
    let store: Arc<dyn SessionStore> = match session_dir {
        Some(directory) => {
            let store = JsonFileSessionStore::open(directory)?;
            info!(directory = %directory.display(), "persisting advisor sessions to disk");
            Arc::new(store)
        }
        None => Arc::new(MemorySessionStore::new()),
    };

    Ok(MatchAdvisor::new(
        MatchEngine::new(matching),
        narrative::from_config(narrative_config),
        store,
        AdvisorSettings::from_config(narrative_config),
    ))
}

pub(crate) fn advisor_from_app_config(config: &AppConfig) -> Result<MatchAdvisor, AppError> {
    build_advisor(
        config.matching,
        &config.narrative,
        config.sessions.directory.as_deref(),
    )
}

pub(crate) fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog, AppError> {
    match path {
        Some(path) => CatalogImporter::from_path(path).map_err(AppError::from),
        None => Ok(Catalog::seed()),
    }
}

pub(crate) fn read_preferences(path: &Path) -> Result<ClientPreferences, AppError> {
    let bytes = std::fs::read(path)?;
    PreferencesDraft::from_json_slice(&bytes).map_err(AppError::from)
}

pub(crate) fn parse_locale(raw: &str) -> Result<ReasonLocale, String> {
    ReasonLocale::parse(raw).ok_or_else(|| format!("unknown locale '{raw}' (expected en or vi)"))
}
