//! Property matching: scores catalog listings against a client's stated preferences.
//!
//! Each criterion is an independent boolean check with a fixed weight, so every point of a
//! score can be traced back to a named reason when an agent presents it to a lead.

mod config;
pub mod domain;
mod location;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{LocationMatchMode, MatchingConfig, ReasonLocale};
pub use domain::{
    BudgetRange, ClientPreferences, ListingId, PropertyListing, PropertyType, ScoredMatch,
};
pub use rules::MatchCriterion;

/// Stateless scorer applying the fixed criterion table to candidate listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine {
    config: MatchingConfig,
}

impl MatchEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Score a single listing. Listings that satisfy no criterion yield `None`.
    pub fn score(
        &self,
        preferences: &ClientPreferences,
        listing: &PropertyListing,
    ) -> Option<ScoredMatch> {
        let criteria = rules::matched_criteria(listing, preferences, &self.config);
        if criteria.is_empty() {
            return None;
        }

        let score = criteria.iter().map(|criterion| criterion.weight()).sum();
        let reasons = criteria
            .iter()
            .map(|criterion| criterion.reason(self.config.locale).to_string())
            .collect();

        Some(ScoredMatch {
            listing: listing.clone(),
            score,
            reasons,
            criteria,
        })
    }

    /// Score every candidate, drop non-matches, and order by score descending.
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn rank(
        &self,
        preferences: &ClientPreferences,
        candidates: &[PropertyListing],
    ) -> Vec<ScoredMatch> {
        let mut ranked: Vec<ScoredMatch> = candidates
            .iter()
            .filter_map(|listing| self.score(preferences, listing))
            .collect();
        ranked.sort_by(|left, right| right.score.cmp(&left.score));
        ranked
    }
}

/// Rank candidates with the default engine configuration.
pub fn match_listings(
    preferences: &ClientPreferences,
    candidates: &[PropertyListing],
) -> Vec<ScoredMatch> {
    MatchEngine::default().rank(preferences, candidates)
}
