//! JobSwipe Match - candidate/job compatibility scoring service
//!
//! This library provides the match scorer used by the JobSwipe app to annotate
//! job listings with a score, short match reasons and the distance to the job.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, RankOptions, RandomSource, FixedRandom, calculate_match_score, distance::haversine_distance};
pub use models::{JobPosting, CandidateProfile, MatchResult, Modality, ExperienceLevel, Seniority, Coordinates, ScoredJob};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let result = calculate_match_score(&JobPosting::default(), None, &FixedRandom(0));
        assert_eq!(result.score, 50);
        assert!(haversine_distance(0.0, 0.0, 0.0, 0.0) < f64::EPSILON);
    }
}
