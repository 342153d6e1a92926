//! Clubfit - golf club recommendation service
//!
//! Scores catalog clubs against a golfer's self-reported profile and ranks
//! them per club type, with localized reasons for each recommendation.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{recommend, Recommender};
pub use models::{Catalog, ClubRecommendation, ClubRecord, ClubType, GolferProfile, Locale, MissTendency, Recommendations, ScoringParams};
pub use services::{CatalogProvider, InMemoryCatalog};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let result = recommend(&GolferProfile::default(), &Catalog::new(), &ScoringParams::default(), Locale::Ko);
        assert!(result.is_empty());
    }
}
