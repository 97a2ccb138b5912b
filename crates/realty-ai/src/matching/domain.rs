use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::rules::MatchCriterion;

/// Identifier wrapper for catalog listings.
///
/// Catalog feeds carry either numeric or textual ids; both are stored as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ListingId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Self(value),
            RawId::Number(value) => Self(value.to_string()),
        })
    }
}

/// Closed set of property categories carried by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[serde(alias = "Căn hộ")]
    Apartment,
    #[serde(alias = "Nhà phố")]
    House,
    #[serde(alias = "Biệt thự")]
    Villa,
    #[serde(alias = "Đất nền")]
    Land,
    #[serde(alias = "Shophouse")]
    Shophouse,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Villa,
        PropertyType::Land,
        PropertyType::Shophouse,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Villa => "villa",
            PropertyType::Land => "land",
            PropertyType::Shophouse => "shophouse",
        }
    }

    pub const fn local_label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "Căn hộ",
            PropertyType::House => "Nhà phố",
            PropertyType::Villa => "Biệt thự",
            PropertyType::Land => "Đất nền",
            PropertyType::Shophouse => "Shophouse",
        }
    }

    /// Resolve either the English wire name or the Vietnamese catalog label.
    pub fn parse_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL.into_iter().find(|kind| {
            trimmed.eq_ignore_ascii_case(kind.label())
                || trimmed.to_lowercase() == kind.local_label().to_lowercase()
        })
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated candidate listing as produced by the catalog boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub id: ListingId,
    #[serde(default)]
    pub title: String,
    pub price: u64,
    pub location: String,
    pub property_type: PropertyType,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u8>,
    #[serde(default)]
    pub features: BTreeSet<String>,
}

impl PropertyListing {
    /// Title used in prompts and CLI output, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.title.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.title
        }
    }
}

/// Inclusive price window stated by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u64,
    pub max: u64,
}

impl BudgetRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// An inverted range contains nothing.
    pub fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// What the client asked for, captured once per scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientPreferences {
    pub budget: BudgetRange,
    pub locations: BTreeSet<String>,
    pub property_types: BTreeSet<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u8>,
}

/// A listing that satisfied at least one criterion, with its audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub listing: PropertyListing,
    pub score: u32,
    pub reasons: Vec<String>,
    pub criteria: Vec<MatchCriterion>,
}
