use std::collections::BTreeSet;

use crate::matching::domain::{
    BudgetRange, ClientPreferences, ListingId, PropertyListing, PropertyType,
};
use crate::matching::{MatchEngine, MatchingConfig};

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

pub(super) fn listing(
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

/// Candidate A: satisfies budget, location, type and area.
pub(super) fn quan9_apartment() -> PropertyListing {
    listing(
        "A",
        4 * BILLION,
        "Quận 9, TP.HCM",
        PropertyType::Apartment,
        80.0,
    )
}

/// Candidate B: satisfies nothing.
pub(super) fn dong_nai_villa() -> PropertyListing {
    listing("B", 20 * BILLION, "Đồng Nai", PropertyType::Villa, 50.0)
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::new(MatchingConfig::default())
}

pub(super) fn ids(matches: &[crate::matching::ScoredMatch]) -> Vec<&str> {
    matches
        .iter()
        .map(|scored| scored.listing.id.as_str())
        .collect()
}
