use crate::advisory::{AdvisorError, StoreError};
use crate::catalog::{CatalogImportError, PreferencesError};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Catalog(CatalogImportError),
    Preferences(PreferencesError),
    Advisor(AdvisorError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Catalog(_) | AppError::Preferences(_) => StatusCode::BAD_REQUEST,
            AppError::Advisor(AdvisorError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Advisor(AdvisorError::Store(StoreError::InvalidClientId(_))) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Advisor(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Preferences(err) => write!(f, "preferences error: {}", err),
            AppError::Advisor(err) => write!(f, "advisor error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Preferences(err) => Some(err),
            AppError::Advisor(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CatalogImportError> for AppError {
    fn from(value: CatalogImportError) -> Self {
        Self::Catalog(value)
    }
}

impl From<PreferencesError> for AppError {
    fn from(value: PreferencesError) -> Self {
        Self::Preferences(value)
    }
}

impl From<AdvisorError> for AppError {
    fn from(value: AdvisorError) -> Self {
        Self::Advisor(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Advisor(AdvisorError::Store(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::ClientId;
    use crate::catalog::ListingValidationError;

    #[test]
    fn rejected_listings_are_bad_requests() {
        let error = AppError::from(CatalogImportError::from(ListingValidationError::EmptyId));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejected_preferences_are_bad_requests() {
        let error = AppError::from(PreferencesError::NoLocations);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.to_string(),
            "preferences error: at least one preferred location is required"
        );

        let malformed = serde_json::from_slice::<serde_json::Value>(b"{")
            .expect_err("truncated json");
        let error = AppError::from(PreferencesError::from(malformed));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_sessions_are_not_found() {
        let client_id = ClientId::parse("lead-7").expect("valid id");
        let error = AppError::from(AdvisorError::SessionNotFound(client_id));
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            error.to_string(),
            "advisor error: no advisor session for client lead-7"
        );
    }

    #[test]
    fn blank_client_ids_are_bad_requests() {
        let error = AppError::from(StoreError::InvalidClientId(" ".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failures_are_internal_errors() {
        let error = AppError::from(StoreError::Unavailable("disk full".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
