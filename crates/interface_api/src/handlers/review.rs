//! Reviewer inbox handlers

use axum::{extract::State, Json};

use crate::dto::claims::ClaimListResponse;
use crate::AppState;

/// Claims waiting for a programme coordinator
pub async fn coordinator_inbox(State(state): State<AppState>) -> Json<ClaimListResponse> {
    Json(ClaimListResponse::from_claims(
        &state.store.get_pending_for_coordinator(),
    ))
}

/// Claims waiting for an academic manager
pub async fn manager_inbox(State(state): State<AppState>) -> Json<ClaimListResponse> {
    Json(ClaimListResponse::from_claims(
        &state.store.get_pending_for_manager(),
    ))
}
