use serde::{Deserialize, Serialize};
use validator::Validate;

use super::domain::{CandidateProfile, JobPosting};

/// Request to score a single job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreJobRequest {
    pub job: JobPosting,
    #[serde(default)]
    pub candidate: Option<CandidateProfile>,
}

/// Request to rank a caller-supplied job list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankJobsRequest {
    #[serde(default)]
    pub candidate: Option<CandidateProfile>,
    pub jobs: Vec<JobPosting>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(alias = "apply_radius_filter", rename = "applyRadiusFilter", default)]
    pub apply_radius_filter: bool,
}

/// Request to build a job feed for a user from the data store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobFeedRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(alias = "apply_radius_filter", rename = "applyRadiusFilter", default)]
    pub apply_radius_filter: bool,
}
