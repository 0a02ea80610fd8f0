//! Axum router configuration

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::limits::rate_limit_middleware;
use crate::metrics::metrics_handler;
use crate::state::AppState;

use super::handlers::{
    get_languages, get_srt, get_transcript, health_check, not_found, root, version_check,
};
use super::middleware::request_logger;

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    // Transcript endpoints hit YouTube, so they sit behind the rate limiter
    let api = Router::new()
        .route("/api/transcript/{video_id}", get(get_transcript))
        .route("/api/languages/{video_id}", get(get_languages))
        .route("/api/srt/{video_id}", get(get_srt))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let mut router = Router::new()
        .route("/", get(root))
        // Health and version endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_check))
        .route("/metrics", get(metrics_handler))
        .merge(api)
        // Route-level so the matched path template is available
        .route_layer(middleware::from_fn_with_state(state.clone(), request_logger))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    if state.config.cors_enabled {
        router = router.layer(cors_layer());
    }

    router.with_state(state)
}

/// Browser clients call the API from any origin
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}
