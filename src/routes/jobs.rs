use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{Matcher, RankOptions};
use crate::models::{
    CandidateProfile, ErrorResponse, HealthResponse, JobFeedRequest, RankJobsRequest,
    RankedJobsResponse, ScoreJobRequest,
};
use crate::services::{DataStoreClient, DataStoreError, ProfileCache};

/// Listing limits applied by the handlers
#[derive(Debug, Clone, Copy)]
pub struct ListingLimits {
    pub default_limit: u16,
    pub max_limit: u16,
    /// Number of jobs pulled from the data store per feed request
    pub fetch_limit: usize,
}

impl ListingLimits {
    fn resolve(&self, requested: Option<u16>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit) as usize
    }
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            fetch_limit: 200,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub datastore: Arc<DataStoreClient>,
    pub cache: ProfileCache,
    pub matcher: Matcher,
    pub limits: ListingLimits,
}

/// Configure all job-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/jobs/score", web::post().to(score_job))
        .route("/jobs/rank", web::post().to(rank_jobs))
        .route("/jobs/feed", web::post().to(job_feed))
        .route("/profiles/{user_id}/cache", web::delete().to(invalidate_profile));
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn upstream_error(context: &str, error: &DataStoreError) -> HttpResponse {
    HttpResponse::BadGateway().json(ErrorResponse {
        error: context.to_string(),
        message: error.to_string(),
        status_code: 502,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.datastore.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Data store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score one job
///
/// POST /api/v1/jobs/score
///
/// Request body:
/// ```json
/// {
///   "job": { "title": "string", "category": "string", "modality": "Remote", "requiredSkills": [] },
///   "candidate": { "skills": [], "tools": [], "targetRole": "string" }
/// }
/// ```
async fn score_job(
    state: web::Data<AppState>,
    req: web::Json<ScoreJobRequest>,
) -> impl Responder {
    let result = state.matcher.score(&req.job, req.candidate.as_ref());

    tracing::debug!("Scored job {:?}: {}", req.job.title, result.score);

    HttpResponse::Ok().json(result)
}

/// Rank a job listing supplied by the caller
///
/// POST /api/v1/jobs/rank
///
/// Request body:
/// ```json
/// {
///   "candidate": { ... },
///   "jobs": [ { ... } ],
///   "limit": 20,
///   "applyRadiusFilter": false
/// }
/// ```
async fn rank_jobs(
    state: web::Data<AppState>,
    req: web::Json<RankJobsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let req = req.into_inner();
    let options = RankOptions {
        limit: state.limits.resolve(req.limit),
        radius_filter: req.apply_radius_filter,
    };

    let result = state.matcher.rank_jobs(req.candidate.as_ref(), req.jobs, options);

    HttpResponse::Ok().json(RankedJobsResponse {
        jobs: result.jobs,
        total_jobs: result.total_jobs,
    })
}

/// Build the job feed of a user
///
/// POST /api/v1/jobs/feed
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 20,
///   "applyRadiusFilter": true
/// }
/// ```
async fn job_feed(
    state: web::Data<AppState>,
    req: web::Json<JobFeedRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for job_feed request: field_errors={:?}", errors);
        return validation_error(errors);
    }

    let user_id = &req.user_id;
    let limit = state.limits.resolve(req.limit);

    tracing::info!("Building job feed for user: {}, limit: {}", user_id, limit);

    // A missing profile falls back to the neutral score, it is not an error
    let profile = match load_profile(&state, user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return upstream_error("Failed to fetch candidate profile", &e);
        }
    };

    let jobs = match state.datastore.list_jobs(state.limits.fetch_limit).await {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::error!("Failed to list jobs for {}: {}", user_id, e);
            return upstream_error("Failed to list jobs", &e);
        }
    };

    let options = RankOptions {
        limit,
        radius_filter: req.apply_radius_filter,
    };
    let result = state.matcher.rank_jobs(profile.as_deref(), jobs, options);

    tracing::info!(
        "Returning {} jobs for user {} (from {} jobs, profile: {})",
        result.jobs.len(),
        user_id,
        result.total_jobs,
        profile.is_some()
    );

    HttpResponse::Ok().json(RankedJobsResponse {
        jobs: result.jobs,
        total_jobs: result.total_jobs,
    })
}

async fn load_profile(
    state: &AppState,
    user_id: &str,
) -> Result<Option<Arc<CandidateProfile>>, DataStoreError> {
    if let Some(profile) = state.cache.get(user_id).await {
        return Ok(Some(profile));
    }

    match state.datastore.get_candidate_profile(user_id).await? {
        Some(profile) => Ok(Some(state.cache.insert(user_id, profile).await)),
        None => Ok(None),
    }
}

/// Drop the cached profile of a user
///
/// DELETE /api/v1/profiles/{userId}/cache
async fn invalidate_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    state.cache.invalidate(&path.into_inner()).await;
    HttpResponse::NoContent().finish()
}
