use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use validator::Validate;

use crate::core::{
    to_child_data, to_family_data, to_job_data, to_nanny_profile, Matcher, RankingOptions,
    ValidationError,
};
use crate::models::{
    ChildData, ChildRecord, ErrorResponse, EvaluateRequest, FamilyData, FamilyRecord,
    HealthResponse, JobData, JobRecord, MatchResult, MatchingRequest, MatchingResponse,
    NannyProfile,
};
use crate::services::{CacheKey, CacheManager};

/// Request defaults for the matching endpoint
#[derive(Debug, Clone, Copy)]
pub struct MatchingDefaults {
    pub min_score: u8,
    pub limit: u16,
    pub max_limit: u16,
}

impl Default for MatchingDefaults {
    fn default() -> Self {
        Self {
            min_score: 0,
            limit: 20,
            max_limit: 100,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub defaults: MatchingDefaults,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching", web::post().to(find_matches))
        .route("/matching/evaluate", web::post().to(evaluate_match));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    tracing::debug!("Cache stats: {:?}", state.cache.stats());

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn invalid_input(err: ValidationError) -> HttpResponse {
    tracing::info!("Rejected matching input: {}", err);
    bad_request("Invalid input", err.to_string())
}

/// Normalize the job side of a request: job, owning family and its children
fn adapt_job_side(
    job: &JobRecord,
    family: &FamilyRecord,
    children: &[ChildRecord],
    now: DateTime<Utc>,
) -> Result<(JobData, FamilyData, Vec<ChildData>), ValidationError> {
    let job = to_job_data(job)?;
    let family = to_family_data(family)?;
    let children = children
        .iter()
        .map(|child| to_child_data(child, now))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((job, family, children))
}

/// Rank candidate nannies for a job
///
/// POST /api/v1/matching
///
/// Request body:
/// ```json
/// {
///   "job": { "id": 1, "mandatoryRequirements": ["NON_SMOKER"], "childrenIds": [3] },
///   "family": { "id": 2, "hasPets": true, "nannyType": "FULL_TIME" },
///   "children": [{ "id": 3, "birthDate": "2024-01-10" }],
///   "candidates": [{ "id": 7, "isSmoker": false }],
///   "minScore": 40,
///   "limit": 20,
///   "includeIneligible": false
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchingRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for matching request: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let now = Utc::now();
    let request_id = uuid::Uuid::new_v4().to_string();

    let (job, family, children) = match adapt_job_side(&req.job, &req.family, &req.children, now) {
        Ok(adapted) => adapted,
        Err(e) => return invalid_input(e),
    };

    let cache_key = match CacheKey::ranking(job.id, &*req, now) {
        Ok(key) => Some(key),
        Err(e) => {
            tracing::warn!("Failed to build ranking cache key: {}", e);
            None
        }
    };

    if let Some(key) = &cache_key {
        if let Ok(mut cached) = state.cache.get::<MatchingResponse>(key).await {
            tracing::debug!("Serving cached ranking for job {}", job.id);
            cached.request_id = request_id;
            return HttpResponse::Ok().json(cached);
        }
    }

    // A candidate whose record is malformed is skipped, not fatal
    let mut skipped_candidates = 0;
    let candidates: Vec<NannyProfile> = req
        .candidates
        .iter()
        .filter_map(|record| match to_nanny_profile(record, now) {
            Ok(nanny) => Some(nanny),
            Err(e) => {
                tracing::warn!("Skipping candidate for job {}: {}", job.id, e);
                skipped_candidates += 1;
                None
            }
        })
        .collect();

    let defaults = state.defaults;
    let options = RankingOptions {
        min_score: req.min_score.unwrap_or(defaults.min_score),
        limit: req.limit.unwrap_or(defaults.limit).min(defaults.max_limit) as usize,
        include_ineligible: req.include_ineligible,
    };

    tracing::info!(
        "Ranking {} candidates for job {} (request {}, min_score: {}, limit: {})",
        candidates.len(),
        job.id,
        request_id,
        options.min_score,
        options.limit
    );

    let result = state
        .matcher
        .rank(&job, &family, &children, &candidates, options, now);

    let response = MatchingResponse {
        request_id,
        job_id: job.id,
        matches: result.matches,
        total_candidates: result.total_candidates + skipped_candidates,
        skipped_candidates,
    };

    tracing::info!(
        "Returning {} matches for job {} (from {} candidates, {} skipped)",
        response.matches.len(),
        job.id,
        response.total_candidates,
        skipped_candidates
    );

    if let Some(key) = &cache_key {
        if let Err(e) = state.cache.set(key, &response).await {
            tracing::warn!("Failed to cache ranking: {}", e);
        }
    }

    HttpResponse::Ok().json(response)
}

/// Evaluate a single nanny against a job
///
/// POST /api/v1/matching/evaluate
///
/// Used by the job-detail page to render the viewer's compatibility.
async fn evaluate_match(
    state: web::Data<AppState>,
    req: web::Json<EvaluateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for evaluate request: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let now = Utc::now();

    let (job, family, children) = match adapt_job_side(&req.job, &req.family, &req.children, now) {
        Ok(adapted) => adapted,
        Err(e) => return invalid_input(e),
    };
    let nanny = match to_nanny_profile(&req.nanny, now) {
        Ok(nanny) => nanny,
        Err(e) => return invalid_input(e),
    };

    let cache_key = CacheKey::evaluation(job.id, nanny.id, &*req, now).ok();
    if let Some(key) = &cache_key {
        if let Ok(cached) = state.cache.get::<MatchResult>(key).await {
            return HttpResponse::Ok().json(cached);
        }
    }

    let result = state.matcher.evaluate(&job, &family, &children, &nanny, now);

    tracing::debug!(
        "Evaluated nanny {} for job {}: score={}, eligible={}",
        nanny.id,
        job.id,
        result.score,
        result.is_eligible
    );

    if let Some(key) = &cache_key {
        if let Err(e) = state.cache.set(key, &result).await {
            tracing::warn!("Failed to cache evaluation: {}", e);
        }
    }

    HttpResponse::Ok().json(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_adapt_job_side_rejects_child_without_id() {
        let job = JobRecord { id: Some(1), ..Default::default() };
        let family = FamilyRecord { id: Some(2), ..Default::default() };
        let children = vec![ChildRecord::default()];

        let err = adapt_job_side(&job, &family, &children, Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { record: "child", field: "id" });
    }
}
