//! API middleware

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::info;

/// Header carrying the acting user's identity
pub const ACTOR_HEADER: &str = "x-actor";

/// Opaque identity of whoever made the request
///
/// Supplied by an upstream identity provider; no authorization is derived
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor(pub String);

impl Actor {
    fn from_header(value: Option<&HeaderValue>) -> Self {
        let name = value
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("anonymous");
        Actor(name.to_string())
    }
}

/// Audit logging middleware
///
/// Logs every API request with the acting identity and makes that identity
/// available to handlers as an [`Actor`] extension.
pub async fn audit_middleware(mut request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let actor = Actor::from_header(request.headers().get(ACTOR_HEADER));
    request.extensions_mut().insert(actor.clone());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        actor = %actor.0,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
