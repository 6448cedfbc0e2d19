// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::{distance_between, haversine_distance};
pub use filters::{contains_either_way, count_skill_overlap, equals_ignore_case, within_search_radius};
pub use matcher::{Matcher, RankOptions, RankResult};
pub use scoring::{calculate_match_score, neutral_result, FixedRandom, RandomSource, ThreadRandom};
