//! Application state management
//!
//! This module defines the AppState structure that holds:
//! - Server configuration
//! - Transcript service (wrapping the upstream source)
//! - Metrics collector
//! - Optional rate limiter
//!
//! The state is built once in `main` and handed to the router; handlers
//! receive it through axum's `State` extractor.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::limits::{create_rate_limiter, RateLimiter};
use crate::metrics::Metrics;
use crate::transcript::{TranscriptService, TranscriptSource};

/// Application state shared across all handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Transcript service
    pub transcripts: TranscriptService,
    /// Metrics collector
    pub metrics: Metrics,
    /// Per-client rate limiter, absent when limiting is disabled
    pub rate_limiter: Option<Arc<RateLimiter>>,
}

impl AppState {
    /// Create application state around a transcript source
    pub fn new(config: ServerConfig, source: Arc<dyn TranscriptSource>) -> Self {
        let transcripts = TranscriptService::new(source, config.transcript.clone());
        let rate_limiter = create_rate_limiter(&config);

        Self {
            config,
            transcripts,
            metrics: Metrics::new(),
            rate_limiter,
        }
    }

    /// Drop idle rate-limit buckets, returning how many were removed
    pub fn cleanup_rate_limits(&self, max_idle: std::time::Duration) -> usize {
        self.rate_limiter
            .as_ref()
            .map(|limiter| limiter.cleanup(max_idle))
            .unwrap_or(0)
    }
}
