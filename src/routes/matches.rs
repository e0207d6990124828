use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{CandidateFilter, RankingPipeline};
use crate::models::{ErrorResponse, ExplainRequest, HealthResponse, RankRequest, RankResponse};
use crate::services::{MatchStore, Notifier, PredictiveService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
    pub predictive: Arc<dyn PredictiveService>,
    pub notifier: Arc<dyn Notifier>,
    pub pipeline: RankingPipeline,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank_matches))
        .route("/matches/explain", web::post().to(explain_match))
        .route(
            "/matches/response-likelihood",
            web::get().to(response_likelihood),
        );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank candidates for a campaign request
///
/// POST /api/v1/matches/rank
///
/// Candidates may be supplied inline; otherwise they are pulled from the
/// store using the request-derived filter (with its hard candidate cap).
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    let RankRequest {
        request,
        candidates,
        user_id,
    } = req.into_inner();

    let candidates = match candidates {
        Some(pool) => pool,
        None => {
            let filter = CandidateFilter::from_request(&request);
            match state.store.find_candidates(&filter).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!("Failed to query candidates: {}", e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Failed to query candidates".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            }
        }
    };

    let total_candidates = candidates.len();
    tracing::info!(
        "Ranking {} candidates for category {}",
        total_candidates,
        request.target_category
    );

    let matches = state
        .pipeline
        .rank(
            state.store.as_ref(),
            state.predictive.as_ref(),
            &request,
            candidates,
            user_id.as_deref(),
        )
        .await;

    tracing::info!(
        "Returning {} matches (from {} candidates)",
        matches.len(),
        total_candidates
    );

    HttpResponse::Ok().json(RankResponse {
        matches,
        total_candidates,
    })
}

/// Per-factor score breakdown for a single creator
///
/// POST /api/v1/matches/explain
async fn explain_match(
    state: web::Data<AppState>,
    req: web::Json<ExplainRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let candidate = match state.store.get_candidate(&req.creator_id).await {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Explain requested for unknown creator {}: {}", req.creator_id, e);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Creator not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            });
        }
    };

    let explanation = state
        .pipeline
        .explain(
            state.store.as_ref(),
            state.predictive.as_ref(),
            &candidate,
            &req.request,
        )
        .await;

    HttpResponse::Ok().json(explanation)
}

/// Responsiveness estimate for a creator
///
/// GET /api/v1/matches/response-likelihood?creatorId={id}
async fn response_likelihood(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let creator_id = match query.get("creatorId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing creatorId parameter".to_string(),
                message: "creatorId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let activity = state
        .store
        .get_user_activity(creator_id)
        .await
        .unwrap_or_default();
    let outreach = state
        .store
        .get_outreach_history(creator_id, 20)
        .await
        .unwrap_or_default();

    let estimate = crate::core::likelihood::estimate(&activity, &outreach, chrono::Utc::now());
    HttpResponse::Ok().json(estimate)
}
