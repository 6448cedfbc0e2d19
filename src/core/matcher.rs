use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::core::{
    filters::within_search_radius,
    scoring::{calculate_match_score, FixedRandom, RandomSource, ThreadRandom},
};
use crate::models::{CandidateProfile, JobPosting, MatchResult, ScoredJob};

/// Options applied when ranking a job listing
#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub limit: usize,
    pub radius_filter: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            radius_filter: false,
        }
    }
}

/// Result of ranking a job listing
#[derive(Debug)]
pub struct RankResult {
    pub jobs: Vec<ScoredJob>,
    pub total_jobs: usize,
}

/// Scores job listings for a candidate and orders them for presentation
///
/// # Pipeline Stages
/// 1. Score every job
/// 2. Optional search-radius filter
/// 3. Sort by score, nearer first on ties
/// 4. Truncate to the requested limit
#[derive(Clone)]
pub struct Matcher {
    random: Arc<dyn RandomSource>,
}

impl Matcher {
    /// Build a matcher; `exploration` toggles the random score component
    pub fn new(exploration: bool) -> Self {
        if exploration {
            Self::with_random_source(Arc::new(ThreadRandom))
        } else {
            Self::deterministic()
        }
    }

    pub fn with_random_source(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Matcher whose exploration draw is always zero
    pub fn deterministic() -> Self {
        Self::with_random_source(Arc::new(FixedRandom(0)))
    }

    /// Score a single job
    pub fn score(&self, job: &JobPosting, candidate: Option<&CandidateProfile>) -> MatchResult {
        calculate_match_score(job, candidate, self.random.as_ref())
    }

    /// Score, filter, sort and truncate a job listing
    ///
    /// # Arguments
    /// * `candidate` - The candidate's profile, if they have one
    /// * `jobs` - Jobs fetched from the data store
    /// * `options` - Limit and radius filter toggle
    ///
    /// # Returns
    /// RankResult containing the ranked jobs and the number of jobs considered
    pub fn rank_jobs(
        &self,
        candidate: Option<&CandidateProfile>,
        jobs: Vec<JobPosting>,
        options: RankOptions,
    ) -> RankResult {
        let total_jobs = jobs.len();

        let mut scored_jobs: Vec<ScoredJob> = jobs
            .into_iter()
            .map(|job| {
                let result = self.score(&job, candidate);
                ScoredJob { job, result }
            })
            .filter(|scored| match candidate {
                Some(profile) if options.radius_filter => within_search_radius(scored, profile),
                _ => true,
            })
            .collect();

        // Sort by score (descending) and then by distance (ascending, unknown last)
        scored_jobs.sort_by(|a, b| {
            b.result
                .score
                .cmp(&a.result.score)
                .then_with(|| compare_distance(a.result.distance_km, b.result.distance_km))
        });

        scored_jobs.truncate(options.limit);

        tracing::debug!(
            "Ranked {} of {} jobs (radius filter: {})",
            scored_jobs.len(),
            total_jobs,
            options.radius_filter
        );

        RankResult {
            jobs: scored_jobs,
            total_jobs,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher").finish_non_exhaustive()
    }
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
