use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::matching::{LocationMatchMode, MatchingConfig, ReasonLocale};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
    pub narrative: NarrativeConfig,
    pub sessions: SessionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                include_targets: environment == AppEnvironment::Development,
            },
            matching: load_matching()?,
            narrative: load_narrative()?,
            sessions: SessionConfig {
                directory: optional_var("SESSION_STORE_DIR").map(PathBuf::from),
            },
        })
    }
}

fn optional_var(key: &'static str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn load_matching() -> Result<MatchingConfig, ConfigError> {
    let location_mode = match optional_var("MATCH_LOCATION_MODE") {
        Some(raw) => LocationMatchMode::parse(&raw).ok_or(ConfigError::InvalidValue {
            key: "MATCH_LOCATION_MODE",
            value: raw,
        })?,
        None => LocationMatchMode::default(),
    };

    let locale = match optional_var("MATCH_REASON_LOCALE") {
        Some(raw) => ReasonLocale::parse(&raw).ok_or(ConfigError::InvalidValue {
            key: "MATCH_REASON_LOCALE",
            value: raw,
        })?,
        None => ReasonLocale::default(),
    };

    Ok(MatchingConfig {
        location_mode,
        locale,
    })
}

fn load_narrative() -> Result<NarrativeConfig, ConfigError> {
    let provider = match optional_var("NARRATIVE_PROVIDER") {
        Some(raw) => NarrativeProviderKind::parse(&raw).ok_or(ConfigError::InvalidValue {
            key: "NARRATIVE_PROVIDER",
            value: raw,
        })?,
        None => NarrativeProviderKind::Auto,
    };

    let timeout_ms = match optional_var("NARRATIVE_TIMEOUT_MS") {
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or(ConfigError::InvalidValue {
                key: "NARRATIVE_TIMEOUT_MS",
                value: raw,
            })?,
        None => NarrativeConfig::DEFAULT_TIMEOUT_MS,
    };

    let top_n = match optional_var("NARRATIVE_TOP_N") {
        Some(raw) => raw.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
            key: "NARRATIVE_TOP_N",
            value: raw,
        })?,
        None => NarrativeConfig::DEFAULT_TOP_N,
    };

    Ok(NarrativeConfig {
        provider,
        openai_api_key: optional_var("OPENAI_API_KEY"),
        gemini_api_key: optional_var("GEMINI_API_KEY"),
        model: optional_var("NARRATIVE_MODEL"),
        openai_base_url: optional_var("OPENAI_BASE_URL")
            .unwrap_or_else(|| NarrativeConfig::OPENAI_BASE_URL.to_string()),
        gemini_base_url: optional_var("GEMINI_BASE_URL")
            .unwrap_or_else(|| NarrativeConfig::GEMINI_BASE_URL.to_string()),
        timeout: Duration::from_millis(timeout_ms),
        top_n,
    })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Print module targets next to each event; on for local development.
    pub include_targets: bool,
}

/// Which text-generation backend writes advisory prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeProviderKind {
    /// First provider with a configured key, otherwise the offline responder.
    Auto,
    OpenAi,
    Gemini,
    Canned,
}

impl NarrativeProviderKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "openai" => Some(Self::OpenAi),
            "gemini" | "google" => Some(Self::Gemini),
            "canned" | "mock" | "offline" => Some(Self::Canned),
            _ => None,
        }
    }
}

/// Narrative generator selection, credentials, and call bounds.
#[derive(Clone)]
pub struct NarrativeConfig {
    pub provider: NarrativeProviderKind,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub model: Option<String>,
    pub openai_base_url: String,
    pub gemini_base_url: String,
    pub timeout: Duration,
    pub top_n: usize,
}

impl NarrativeConfig {
    pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
    pub const DEFAULT_TOP_N: usize = 3;
    pub const OPENAI_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const GEMINI_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            provider: NarrativeProviderKind::Auto,
            openai_api_key: None,
            gemini_api_key: None,
            model: None,
            openai_base_url: Self::OPENAI_BASE_URL.to_string(),
            gemini_base_url: Self::GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_millis(Self::DEFAULT_TIMEOUT_MS),
            top_n: Self::DEFAULT_TOP_N,
        }
    }
}

// Keys stay out of logs.
impl fmt::Debug for NarrativeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrativeConfig")
            .field("provider", &self.provider)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "***"))
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("openai_base_url", &self.openai_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("timeout", &self.timeout)
            .field("top_n", &self.top_n)
            .finish()
    }
}

/// Where advisory sessions are persisted. `None` keeps them in memory.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has unsupported value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
