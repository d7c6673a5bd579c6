//! Claims handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;

use core_kernel::ClaimId;
use domain_claims::{status, ClaimAction, ClaimStatus, StatusView};

use crate::dto::claims::*;
use crate::middleware::Actor;
use crate::{error::ApiError, AppState};

/// Creates a claim from the lecturer's form
pub async fn create_claim(
    State(state): State<AppState>,
    Query(query): Query<CreateClaimQuery>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state.store.submit(request.into(), query.mode())?;

    info!(
        claim_id = %claim.id,
        lecturer_id = %claim.lecturer_id,
        status = %claim.status,
        actor = %actor.0,
        "Claim created"
    );
    Ok((StatusCode::CREATED, Json(ClaimResponse::from(&claim))))
}

/// Lists claims, optionally filtered by status and lecturer
pub async fn list_claims(
    State(state): State<AppState>,
    Query(query): Query<ListClaimsQuery>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<ClaimStatus>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let mut claims = match query.lecturer_id {
        Some(lecturer_id) => state.store.claims_for_lecturer(lecturer_id),
        None => match status {
            Some(status) => state.store.get_claims_by_status(status),
            None => state.store.get_all_claims(),
        },
    };
    if let Some(status) = status {
        claims.retain(|claim| claim.status == status);
    }

    Ok(Json(ClaimListResponse::from_claims(&claims)))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.store.get_claim_by_id(ClaimId::new(id))?;
    Ok(Json(ClaimResponse::from(&claim)))
}

/// Progress tracker for a claim
pub async fn get_claim_status(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<StatusView>, ApiError> {
    let claim = state.store.get_claim_by_id(ClaimId::new(id))?;
    Ok(Json(status::project(&claim)))
}

fn comment_of(body: &Option<Json<TransitionRequest>>) -> &str {
    body.as_ref()
        .and_then(|Json(req)| req.comment.as_deref())
        .unwrap_or_default()
}

fn transitioned(
    state: &AppState,
    id: u64,
    action: ClaimAction,
    actor: &Actor,
    comment: &str,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id = ClaimId::new(id);
    let claim = match action {
        ClaimAction::Submit => state.store.submit_claim(id),
        ClaimAction::Verify => state.store.verify_claim(id, comment),
        ClaimAction::Approve => state.store.approve_claim(id, comment),
        ClaimAction::Reject => state.store.reject_claim(id, comment),
        ClaimAction::Settle => {
            let reference = Some(comment).filter(|c| !c.trim().is_empty());
            state.store.settle_claim(id, reference)
        }
    }?;

    info!(claim_id = %id, action = %action, actor = %actor.0, "Claim action applied");
    Ok(Json(ClaimResponse::from(&claim)))
}

/// Lecturer sends a draft for verification
pub async fn submit_claim(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ClaimResponse>, ApiError> {
    transitioned(&state, id, ClaimAction::Submit, &actor, "")
}

/// Coordinator verifies a submitted claim
pub async fn verify_claim(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Extension(actor): Extension<Actor>,
    body: Option<Json<TransitionRequest>>,
) -> Result<Json<ClaimResponse>, ApiError> {
    transitioned(&state, id, ClaimAction::Verify, &actor, comment_of(&body))
}

/// Manager approves a verified claim
pub async fn approve_claim(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Extension(actor): Extension<Actor>,
    body: Option<Json<TransitionRequest>>,
) -> Result<Json<ClaimResponse>, ApiError> {
    transitioned(&state, id, ClaimAction::Approve, &actor, comment_of(&body))
}

/// Coordinator or manager rejects a claim
pub async fn reject_claim(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Extension(actor): Extension<Actor>,
    body: Option<Json<TransitionRequest>>,
) -> Result<Json<ClaimResponse>, ApiError> {
    transitioned(&state, id, ClaimAction::Reject, &actor, comment_of(&body))
}

/// Finance records payment; the comment is the payment reference
pub async fn settle_claim(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Extension(actor): Extension<Actor>,
    body: Option<Json<TransitionRequest>>,
) -> Result<Json<ClaimResponse>, ApiError> {
    transitioned(&state, id, ClaimAction::Settle, &actor, comment_of(&body))
}
