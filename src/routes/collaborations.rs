use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::lifecycle::{self, LifecycleError};
use crate::models::{
    ErrorResponse, Feedback, FeedbackRequest, TransitionRequest, TransitionResponse,
    UpdateTermsRequest,
};
use crate::routes::matches::AppState;

/// Configure collaboration lifecycle routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/collaborations/{id}/transition",
        web::post().to(transition),
    )
    .route("/collaborations/{id}/terms", web::patch().to(update_terms))
    .route(
        "/collaborations/{id}/feedback",
        web::post().to(submit_feedback),
    );
}

/// Move a collaboration to a new lifecycle state
///
/// POST /api/v1/collaborations/{id}/transition
///
/// Rejections are recoverable: the response carries the set of transitions
/// that would have been accepted.
async fn transition(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<TransitionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let id = path.into_inner();
    let result = lifecycle::transition(
        state.store.as_ref(),
        state.notifier.as_ref(),
        id,
        req.new_status,
        &req.actor_id,
    )
    .await;

    match result {
        Ok(collaboration) => HttpResponse::Ok().json(TransitionResponse {
            ok: true,
            collaboration: Some(collaboration),
            error: None,
            allowed_transitions: None,
        }),
        Err(LifecycleError::Invalid(e)) => HttpResponse::Conflict().json(TransitionResponse {
            ok: false,
            collaboration: None,
            error: Some(e.to_string()),
            allowed_transitions: Some(e.allowed().to_vec()),
        }),
        Err(LifecycleError::NotFound(id)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Collaboration not found".to_string(),
            message: id.to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Transition failed for {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Transition failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Edit deliverables/milestones inside the editable window
///
/// PATCH /api/v1/collaborations/{id}/terms
async fn update_terms(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTermsRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let req = req.into_inner();

    match lifecycle::update_terms(state.store.as_ref(), id, req.deliverables, req.milestones).await
    {
        Ok(collaboration) => HttpResponse::Ok().json(collaboration),
        Err(LifecycleError::NotEditable { status, .. }) => {
            HttpResponse::Conflict().json(ErrorResponse {
                error: "Collaboration not editable".to_string(),
                message: format!("terms cannot be edited in state {}", status),
                status_code: 409,
            })
        }
        Err(LifecycleError::NotFound(id)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Collaboration not found".to_string(),
            message: id.to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Terms update failed for {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Update failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Record one party's feedback on a collaboration
///
/// POST /api/v1/collaborations/{id}/feedback
async fn submit_feedback(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<FeedbackRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let id = path.into_inner();
    let feedback = Feedback {
        rating: req.rating,
        comment: req.comment.clone(),
    };

    match lifecycle::submit_feedback(
        state.store.as_ref(),
        state.notifier.as_ref(),
        id,
        req.author,
        feedback,
    )
    .await
    {
        Ok(collaboration) => HttpResponse::Ok().json(collaboration),
        Err(LifecycleError::NotFound(id)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Collaboration not found".to_string(),
            message: id.to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Feedback recording failed for {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Feedback failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
