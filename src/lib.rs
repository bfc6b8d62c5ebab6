//! Nanny Match - job/nanny compatibility matching service
//!
//! This library provides the matching engine used by the nanny marketplace:
//! hard elimination filters followed by a weighted multi-factor score with a
//! per-component breakdown.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, Matcher, RankingOptions, ValidationError};
pub use models::{ChildData, FamilyData, JobData, MatchResult, NannyProfile, ScoreComponent, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let matcher = Matcher::default();
        assert_eq!(matcher.weights(), &ScoringWeights::default());
    }
}
