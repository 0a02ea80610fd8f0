//! HTTP middleware
//!
//! Request logging with per-request ids.

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::state::AppState;

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request logging middleware
///
/// Counts the request under its route template, runs it inside a span
/// tagged with a fresh request id and echoes that id back to the client.
pub async fn request_logger(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let request_id = Uuid::new_v4().to_string();

    state.metrics.record_request(&endpoint);

    let start = Instant::now();
    let mut response = next
        .run(request)
        .instrument(tracing::info_span!("request", id = %request_id))
        .await;
    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        info!(request_id = %request_id, "{} {} {} in {:?}", method, uri, status, duration);
    } else {
        warn!(request_id = %request_id, "{} {} {} in {:?}", method, uri, status, duration);
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
