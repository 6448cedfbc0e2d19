use rand::Rng;

use crate::core::{
    distance::distance_between,
    filters::{contains_either_way, count_skill_overlap, equals_ignore_case},
};
use crate::models::{CandidateProfile, JobPosting, MatchResult, Modality};

/// Maximum number of reasons attached to a result
pub const MAX_MATCH_REASONS: usize = 2;

/// Score returned when no candidate profile is available
pub const NEUTRAL_SCORE: u8 = 50;

/// Reason returned when no candidate profile is available
pub const COMPLETE_PROFILE_REASON: &str = "Complete your profile to see your compatibility";

const RADIUS_POINTS: f64 = 10.0;
const SKILLS_WEIGHT: f64 = 40.0;
const NO_REQUIREMENTS_POINTS: f64 = 20.0;
const ROLE_POINTS: f64 = 20.0;
const INDUSTRY_POINTS: f64 = 15.0;
const MODALITY_POINTS: f64 = 15.0;
const HYBRID_POINTS: f64 = 10.0;
const EXPERIENCE_POINTS: f64 = 15.0;
const NEUTRAL_EXPERIENCE_POINTS: f64 = 10.0;
const EXPLORATION_BOUND: u32 = 10;

/// Source of the exploration draw
///
/// `next_int(bound)` returns a value in `0..bound`, or `0` when `bound` is `0`.
pub trait RandomSource: Send + Sync {
    fn next_int(&self, bound: u32) -> u32;
}

/// Thread-local RNG, used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_int(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Always returns the same draw, clamped below `bound`
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn next_int(&self, bound: u32) -> u32 {
        self.0.min(bound.saturating_sub(1))
    }
}

/// Points and optional reason produced by one scoring factor
struct Contribution {
    points: f64,
    reason: Option<String>,
}

impl Contribution {
    fn silent(points: f64) -> Self {
        Self { points, reason: None }
    }

    fn with_reason(points: f64, reason: impl Into<String>) -> Self {
        Self {
            points,
            reason: Some(reason.into()),
        }
    }
}

/// Calculate the compatibility (0-100) of a job with a candidate
///
/// Scoring formula, factors evaluated in this order:
/// score = (
///     radius_bonus        # +10 when both sides are geocoded and within radius
///   + skill_overlap       # matched / required * 40, flat 20 without requirements
///   + role_or_industry    # +20 role substring match, else +15 industry match
///   + modality            # +15 exact, +10 if either side is hybrid
///   + experience          # +15 level found in title, else +10
///   + exploration         # random draw in 0..10
/// )
///
/// The sum is rounded and clamped to 0..=100. Reasons keep evaluation order and
/// only the first two survive. Without a candidate the neutral result is
/// returned.
pub fn calculate_match_score(
    job: &JobPosting,
    candidate: Option<&CandidateProfile>,
    random: &dyn RandomSource,
) -> MatchResult {
    let Some(candidate) = candidate else {
        return neutral_result();
    };

    let distance_km = match (&job.coordinates, &candidate.coordinates) {
        (Some(job_location), Some(candidate_location)) => {
            Some(distance_between(candidate_location, job_location))
        }
        _ => None,
    };

    let contributions = [
        radius_contribution(distance_km, candidate),
        skills_contribution(job, candidate),
        role_contribution(job, candidate),
        modality_contribution(job.modality, candidate.preferred_modality),
        experience_contribution(job, candidate),
        Contribution::silent(f64::from(random.next_int(EXPLORATION_BOUND))),
    ];

    let total: f64 = contributions.iter().map(|c| c.points).sum();
    let match_reasons = contributions
        .into_iter()
        .filter_map(|c| c.reason)
        .take(MAX_MATCH_REASONS)
        .collect();

    MatchResult {
        score: total.round().clamp(0.0, 100.0) as u8,
        match_reasons,
        distance_km,
    }
}

/// Result used when the candidate has no profile yet
pub fn neutral_result() -> MatchResult {
    MatchResult {
        score: NEUTRAL_SCORE,
        match_reasons: vec![COMPLETE_PROFILE_REASON.to_string()],
        distance_km: None,
    }
}

fn radius_contribution(distance_km: Option<f64>, candidate: &CandidateProfile) -> Contribution {
    match distance_km {
        Some(distance) if distance <= candidate.search_radius() => {
            Contribution::with_reason(RADIUS_POINTS, "Within your search radius")
        }
        _ => Contribution::silent(0.0),
    }
}

fn skills_contribution(job: &JobPosting, candidate: &CandidateProfile) -> Contribution {
    let total_required = job.required_skills.len();
    if total_required == 0 {
        return Contribution::silent(NO_REQUIREMENTS_POINTS);
    }

    let matched = count_skill_overlap(&job.required_skills, candidate);
    let points = matched as f64 / total_required as f64 * SKILLS_WEIGHT;

    match matched {
        0 => Contribution::silent(points),
        1 => Contribution::with_reason(points, "1 matching skill"),
        n => Contribution::with_reason(points, format!("{} matching skills", n)),
    }
}

fn role_contribution(job: &JobPosting, candidate: &CandidateProfile) -> Contribution {
    if contains_either_way(&candidate.target_role, &job.title) {
        Contribution::with_reason(ROLE_POINTS, "Desired role compatible")
    } else if equals_ignore_case(&job.category, &candidate.target_industry) {
        Contribution::with_reason(INDUSTRY_POINTS, "Area of interest compatible")
    } else {
        Contribution::silent(0.0)
    }
}

fn modality_contribution(job_modality: Modality, preferred: Modality) -> Contribution {
    if preferred.is_specified() && preferred == job_modality {
        Contribution::with_reason(
            MODALITY_POINTS,
            format!("{} work matches your preference", job_modality.label()),
        )
    } else if preferred == Modality::Hybrid || job_modality == Modality::Hybrid {
        Contribution::silent(HYBRID_POINTS)
    } else {
        Contribution::silent(0.0)
    }
}

fn experience_contribution(job: &JobPosting, candidate: &CandidateProfile) -> Contribution {
    let title = job.title.to_lowercase();
    match candidate.experience_level.keyword() {
        Some(keyword) if !keyword.is_empty() && title.contains(&keyword) => {
            Contribution::with_reason(EXPERIENCE_POINTS, "Ideal experience level")
        }
        _ => Contribution::silent(NEUTRAL_EXPERIENCE_POINTS),
    }
}
