use serde::{Deserialize, Serialize};

use super::config::{MatchingConfig, ReasonLocale};
use super::domain::{ClientPreferences, PropertyListing};
use super::location::location_matches;

/// Preference dimensions checked for every candidate, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCriterion {
    Budget,
    Location,
    PropertyType,
    Area,
    Bedrooms,
}

impl MatchCriterion {
    pub const ORDER: [MatchCriterion; 5] = [
        MatchCriterion::Budget,
        MatchCriterion::Location,
        MatchCriterion::PropertyType,
        MatchCriterion::Area,
        MatchCriterion::Bedrooms,
    ];

    pub const fn weight(self) -> u32 {
        match self {
            MatchCriterion::Budget => 30,
            MatchCriterion::Location => 25,
            MatchCriterion::PropertyType => 20,
            MatchCriterion::Area => 15,
            MatchCriterion::Bedrooms => 10,
        }
    }

    pub const fn reason(self, locale: ReasonLocale) -> &'static str {
        match (self, locale) {
            (MatchCriterion::Budget, ReasonLocale::English) => "within stated budget",
            (MatchCriterion::Location, ReasonLocale::English) => "matches desired location",
            (MatchCriterion::PropertyType, ReasonLocale::English) => {
                "matches desired property type"
            }
            (MatchCriterion::Area, ReasonLocale::English) => "meets minimum area requirement",
            (MatchCriterion::Bedrooms, ReasonLocale::English) => "matches desired bedroom count",
            (MatchCriterion::Budget, ReasonLocale::Vietnamese) => "Phù hợp ngân sách",
            (MatchCriterion::Location, ReasonLocale::Vietnamese) => "Vị trí mong muốn",
            (MatchCriterion::PropertyType, ReasonLocale::Vietnamese) => "Đúng loại hình",
            (MatchCriterion::Area, ReasonLocale::Vietnamese) => "Diện tích phù hợp",
            (MatchCriterion::Bedrooms, ReasonLocale::Vietnamese) => "Đủ số phòng ngủ",
        }
    }

    fn holds(
        self,
        listing: &PropertyListing,
        preferences: &ClientPreferences,
        config: &MatchingConfig,
    ) -> bool {
        match self {
            MatchCriterion::Budget => preferences.budget.contains(listing.price),
            MatchCriterion::Location => location_matches(
                &listing.location,
                &preferences.locations,
                config.location_mode,
            ),
            MatchCriterion::PropertyType => {
                preferences.property_types.contains(&listing.property_type)
            }
            MatchCriterion::Area => preferences
                .min_area
                .map(|min_area| listing.area >= min_area)
                .unwrap_or(false),
            MatchCriterion::Bedrooms => match (preferences.bedrooms, listing.bedrooms) {
                (Some(wanted), Some(actual)) => wanted == actual,
                _ => false,
            },
        }
    }
}

/// Criteria satisfied by one listing, in evaluation order.
pub(crate) fn matched_criteria(
    listing: &PropertyListing,
    preferences: &ClientPreferences,
    config: &MatchingConfig,
) -> Vec<MatchCriterion> {
    MatchCriterion::ORDER
        .into_iter()
        .filter(|criterion| criterion.holds(listing, preferences, config))
        .collect()
}
