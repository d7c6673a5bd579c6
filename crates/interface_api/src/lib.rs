//! HTTP API Layer
//!
//! This crate provides the REST API for the lecturer claims workflow using
//! Axum. It is a thin adapter: every route delegates to `domain_claims`.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for lecturers, reviewers and documents
//! - **Middleware**: Tracing and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Storage**: Local filesystem adapter for supporting documents
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod storage;
pub mod upload;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, delete},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_claims::{ClaimsStore, DocumentStorage};

use crate::config::ApiConfig;
use crate::middleware::audit_middleware;
use crate::handlers::{claims, documents, health, review};
use crate::storage::LocalDocumentStorage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ClaimsStore>,
    pub storage: Arc<dyn DocumentStorage>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Empty store with documents kept under the configured upload directory
    pub fn new(config: ApiConfig) -> Self {
        let storage = LocalDocumentStorage::new(config.upload_dir.clone());
        Self::with_parts(Arc::new(ClaimsStore::new()), Arc::new(storage), config)
    }

    pub fn with_parts(
        store: Arc<ClaimsStore>,
        storage: Arc<dyn DocumentStorage>,
        config: ApiConfig,
    ) -> Self {
        Self {
            store,
            storage,
            config: Arc::new(config),
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Claims store, document storage and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (not audited)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::create_claim))
        .route("/", get(claims::list_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/status", get(claims::get_claim_status))
        .route("/:id/submit", post(claims::submit_claim))
        .route("/:id/verify", post(claims::verify_claim))
        .route("/:id/approve", post(claims::approve_claim))
        .route("/:id/reject", post(claims::reject_claim))
        .route("/:id/settle", post(claims::settle_claim))
        .route(
            "/:id/documents",
            post(documents::upload_documents)
                .layer(DefaultBodyLimit::max(state.config.max_request_bytes())),
        )
        .route("/:id/documents/:document_id", delete(documents::delete_document));

    // Reviewer inboxes
    let review_routes = Router::new()
        .route("/coordinator", get(review::coordinator_inbox))
        .route("/manager", get(review::manager_inbox));

    // Audited API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/review", review_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    // Combine all routes
    Router::new()
        .nest("/api/v1", public_routes.merge(api_routes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
