// Model exports
pub mod domain;
pub mod records;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateProfile, Coordinates, ExperienceLevel, JobPosting, MatchResult, Modality, ScoredJob, Seniority,
    DEFAULT_SEARCH_RADIUS_KM,
};
pub use records::{JobRecord, ProfileMetadata, ProfileRecord};
pub use requests::{JobFeedRequest, RankJobsRequest, ScoreJobRequest};
pub use responses::{ErrorResponse, HealthResponse, RankedJobsResponse};
