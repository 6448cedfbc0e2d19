use std::collections::HashSet;

use crate::models::{CandidateProfile, Modality, ScoredJob};

/// Case-insensitive substring check in either direction
///
/// Empty input on either side never matches. Short values still match inside
/// longer words ("AI" matches "Email Marketing"); there is no word-boundary
/// check.
#[inline]
pub fn contains_either_way(left: &str, right: &str) -> bool {
    let left = left.trim().to_lowercase();
    let right = right.trim().to_lowercase();
    if left.is_empty() || right.is_empty() {
        return false;
    }

    left.contains(&right) || right.contains(&left)
}

/// Case-insensitive equality, false when either side is empty
#[inline]
pub fn equals_ignore_case(left: &str, right: &str) -> bool {
    let left = left.trim();
    let right = right.trim();
    !left.is_empty() && left.to_lowercase() == right.to_lowercase()
}

/// Count required skills covered by the candidate's skills or tools
///
/// Each required entry is counted on its own, so duplicated requirements count
/// twice when covered.
pub fn count_skill_overlap(required: &[String], candidate: &CandidateProfile) -> usize {
    let evidence: HashSet<String> = candidate
        .skills
        .iter()
        .chain(candidate.tools.iter())
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect();

    required
        .iter()
        .filter(|skill| evidence.contains(&skill.trim().to_lowercase()))
        .count()
}

/// Check whether a scored job passes the candidate's search radius
///
/// Jobs without a computed distance and remote jobs always pass.
#[inline]
pub fn within_search_radius(scored: &ScoredJob, candidate: &CandidateProfile) -> bool {
    if scored.job.modality == Modality::Remote {
        return true;
    }

    match scored.result.distance_km {
        Some(distance_km) => distance_km <= candidate.search_radius(),
        None => true,
    }
}
