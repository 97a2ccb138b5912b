use std::collections::BTreeSet;

use serde::Deserialize;

use crate::matching::{ListingId, PropertyListing, PropertyType};

/// Unvalidated listing as it arrives from a feed or upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingDraft {
    pub id: ListingId,
    #[serde(default)]
    pub title: Option<String>,
    pub price: i64,
    pub location: String,
    #[serde(alias = "type")]
    pub property_type: String,
    pub area: f64,
    #[serde(default)]
    pub bedrooms: Option<i64>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl ListingDraft {
    pub fn validate(self) -> Result<PropertyListing, ListingValidationError> {
        let id = ListingId(self.id.0.trim().to_string());
        if id.0.is_empty() {
            return Err(ListingValidationError::EmptyId);
        }

        let price = u64::try_from(self.price).map_err(|_| ListingValidationError::NegativePrice {
            id: id.clone(),
            price: self.price,
        })?;

        let location = self.location.trim().to_string();
        if location.is_empty() {
            return Err(ListingValidationError::EmptyLocation { id });
        }

        let property_type = PropertyType::parse_label(&self.property_type).ok_or_else(|| {
            ListingValidationError::UnknownPropertyType {
                id: id.clone(),
                label: self.property_type.clone(),
            }
        })?;

        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(ListingValidationError::InvalidArea {
                id,
                area: self.area,
            });
        }

        let bedrooms = self
            .bedrooms
            .map(|count| {
                u8::try_from(count).map_err(|_| ListingValidationError::InvalidBedrooms {
                    id: id.clone(),
                    bedrooms: count,
                })
            })
            .transpose()?;

        let features: BTreeSet<String> = self
            .features
            .into_iter()
            .map(|feature| feature.trim().to_string())
            .filter(|feature| !feature.is_empty())
            .collect();

        Ok(PropertyListing {
            id,
            title: self.title.unwrap_or_default().trim().to_string(),
            price,
            location,
            property_type,
            area: self.area,
            bedrooms,
            features,
        })
    }
}

/// Reasons a listing is refused at the catalog boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("listing id must not be empty")]
    EmptyId,
    #[error("listing {id} has a negative price ({price})")]
    NegativePrice { id: ListingId, price: i64 },
    #[error("listing {id} has no location")]
    EmptyLocation { id: ListingId },
    #[error("listing {id} has unknown property type '{label}'")]
    UnknownPropertyType { id: ListingId, label: String },
    #[error("listing {id} has invalid area {area}")]
    InvalidArea { id: ListingId, area: f64 },
    #[error("listing {id} has invalid bedroom count {bedrooms}")]
    InvalidBedrooms { id: ListingId, bedrooms: i64 },
    #[error("listing id {0} appears more than once")]
    DuplicateId(ListingId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ListingDraft {
        ListingDraft {
            id: ListingId::from(" mcp-b2101 "),
            title: Some("Masteri Centre Point B-2101".to_string()),
            price: 4_000_000_000,
            location: "Quận 9, TP.HCM".to_string(),
            property_type: "Căn hộ".to_string(),
            area: 80.0,
            bedrooms: Some(2),
            features: vec!["Full nội thất".to_string(), " ".to_string()],
        }
    }

    #[test]
    fn accepts_local_labels_and_trims_fields() {
        let listing = draft().validate().expect("valid draft");
        assert_eq!(listing.id.as_str(), "mcp-b2101");
        assert_eq!(listing.property_type, PropertyType::Apartment);
        assert_eq!(listing.bedrooms, Some(2));
        assert_eq!(listing.features.len(), 1);
    }

    #[test]
    fn rejects_negative_price() {
        let mut bad = draft();
        bad.price = -1;
        assert!(matches!(
            bad.validate(),
            Err(ListingValidationError::NegativePrice { price: -1, .. })
        ));
    }

    #[test]
    fn rejects_non_positive_area() {
        for area in [0.0, -12.5, f64::NAN] {
            let mut bad = draft();
            bad.area = area;
            assert!(matches!(
                bad.validate(),
                Err(ListingValidationError::InvalidArea { .. })
            ));
        }
    }

    #[test]
    fn rejects_unknown_type() {
        let mut bad = draft();
        bad.property_type = "castle".to_string();
        let err = bad.validate().expect_err("unknown type");
        assert_eq!(
            err.to_string(),
            "listing mcp-b2101 has unknown property type 'castle'"
        );
    }

    #[test]
    fn missing_bedrooms_stay_unknown() {
        let mut land = draft();
        land.bedrooms = None;
        let listing = land.validate().expect("valid");
        assert_eq!(listing.bedrooms, None);
    }
}
