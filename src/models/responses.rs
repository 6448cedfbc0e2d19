use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredJob;

/// Ranked job listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedJobsResponse {
    pub jobs: Vec<ScoredJob>,
    #[serde(rename = "totalJobs")]
    pub total_jobs: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
