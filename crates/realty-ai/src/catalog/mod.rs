//! Listing catalog: validated ingestion from CSV or JSON plus a built-in demo inventory.
//! Client preferences pass through the same boundary before they reach the scorer.

mod parser;
mod preferences;
mod seed;
mod validation;

pub use preferences::{BudgetDraft, PreferencesDraft, PreferencesError};
pub use validation::{ListingDraft, ListingValidationError};

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::matching::{ListingId, PropertyListing};

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Invalid(ListingValidationError),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid catalog JSON data: {}", err),
            CatalogImportError::Invalid(err) => write!(f, "rejected catalog listing: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
            CatalogImportError::Invalid(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<ListingValidationError> for CatalogImportError {
    fn from(err: ListingValidationError) -> Self {
        Self::Invalid(err)
    }
}

/// Ordered, id-unique collection of validated listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    listings: Vec<PropertyListing>,
}

impl Catalog {
    /// Demo inventory modelled on the projects agents were pitching.
    pub fn seed() -> Self {
        Self {
            listings: seed::seed_listings(),
        }
    }

    /// Validate drafts in order, rejecting the first invalid or duplicate entry.
    pub fn from_drafts<I>(drafts: I) -> Result<Self, ListingValidationError>
    where
        I: IntoIterator<Item = ListingDraft>,
    {
        let mut seen = HashSet::new();
        let mut listings = Vec::new();

        for draft in drafts {
            let listing = draft.validate()?;
            if !seen.insert(listing.id.clone()) {
                return Err(ListingValidationError::DuplicateId(listing.id));
            }
            listings.push(listing);
        }

        Ok(Self { listings })
    }

    pub fn listings(&self) -> &[PropertyListing] {
        &self.listings
    }

    pub fn into_listings(self) -> Vec<PropertyListing> {
        self.listings
    }

    pub fn get(&self, id: &ListingId) -> Option<&PropertyListing> {
        self.listings.iter().find(|listing| &listing.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Catalog, CatalogImportError> {
        let drafts = parser::parse_drafts(reader)?;
        Ok(Catalog::from_drafts(drafts)?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Catalog, CatalogImportError> {
        let drafts: Vec<ListingDraft> = serde_json::from_slice(bytes)?;
        Ok(Catalog::from_drafts(drafts)?)
    }
}
