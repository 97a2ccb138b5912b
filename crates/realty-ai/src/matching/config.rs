use serde::{Deserialize, Serialize};

/// How a listing's location is compared against the preferred areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMatchMode {
    /// Case and diacritic insensitive substring match ("quan 9" finds "Quận 9, TP.HCM").
    #[default]
    Folded,
    /// Raw, case-sensitive substring match.
    Exact,
}

impl LocationMatchMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "folded" | "normalized" => Some(Self::Folded),
            "exact" | "raw" => Some(Self::Exact),
            _ => None,
        }
    }
}

/// Language used for match reasons and advisory prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReasonLocale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "vi")]
    Vietnamese,
}

impl ReasonLocale {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Self::English),
            "vi" | "vietnamese" => Some(Self::Vietnamese),
            _ => None,
        }
    }
}

/// Knobs for the match engine. Criterion weights are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub location_mode: LocationMatchMode,
    #[serde(default)]
    pub locale: ReasonLocale,
}
