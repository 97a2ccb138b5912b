use std::collections::BTreeSet;

use serde::Deserialize;

use crate::matching::{BudgetRange, ClientPreferences, PropertyType};

/// Client preferences as they arrive from a request body or a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PreferencesDraft {
    pub budget: BudgetDraft,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub property_types: Vec<String>,
    #[serde(default)]
    pub min_area: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BudgetDraft {
    pub min: i64,
    pub max: i64,
}

impl PreferencesDraft {
    pub fn from_json_slice(bytes: &[u8]) -> Result<ClientPreferences, PreferencesError> {
        let draft: PreferencesDraft = serde_json::from_slice(bytes)?;
        draft.validate()
    }

    pub fn validate(self) -> Result<ClientPreferences, PreferencesError> {
        let min = u64::try_from(self.budget.min)
            .map_err(|_| PreferencesError::NegativeBudget(self.budget.min))?;
        let max = u64::try_from(self.budget.max)
            .map_err(|_| PreferencesError::NegativeBudget(self.budget.max))?;
        if min > max {
            return Err(PreferencesError::InvertedBudget { min, max });
        }

        let locations: BTreeSet<String> = self
            .locations
            .into_iter()
            .map(|location| location.trim().to_string())
            .filter(|location| !location.is_empty())
            .collect();
        if locations.is_empty() {
            return Err(PreferencesError::NoLocations);
        }

        let property_types = self
            .property_types
            .iter()
            .map(|label| {
                PropertyType::parse_label(label)
                    .ok_or_else(|| PreferencesError::UnknownPropertyType(label.clone()))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        if property_types.is_empty() {
            return Err(PreferencesError::NoPropertyTypes);
        }

        if let Some(area) = self.min_area {
            if !area.is_finite() || area < 0.0 {
                return Err(PreferencesError::InvalidMinArea(area));
            }
        }

        let bedrooms = self
            .bedrooms
            .map(|count| u8::try_from(count).map_err(|_| PreferencesError::InvalidBedrooms(count)))
            .transpose()?;

        Ok(ClientPreferences {
            budget: BudgetRange::new(min, max),
            locations,
            property_types,
            min_area: self.min_area,
            bedrooms,
        })
    }
}

/// Reasons client preferences are refused before scoring.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("preferences are not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("budget bound {0} is negative")]
    NegativeBudget(i64),
    #[error("budget minimum {min} exceeds maximum {max}")]
    InvertedBudget { min: u64, max: u64 },
    #[error("at least one preferred location is required")]
    NoLocations,
    #[error("at least one property type is required")]
    NoPropertyTypes,
    #[error("unknown property type '{0}'")]
    UnknownPropertyType(String),
    #[error("minimum area {0} must be a non-negative number")]
    InvalidMinArea(f64),
    #[error("invalid bedroom count {0}")]
    InvalidBedrooms(i64),
}
