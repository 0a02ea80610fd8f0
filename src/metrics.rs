//! Prometheus-compatible metrics endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::state::AppState;

/// Metrics collector
#[derive(Debug)]
pub struct Metrics {
    /// Server start time
    start_time: Instant,
    /// Total requests processed
    request_count: RwLock<u64>,
    /// Requests by endpoint
    requests_by_endpoint: RwLock<HashMap<String, u64>>,
    /// Transcripts fetched successfully
    transcripts_fetched: RwLock<u64>,
    /// SRT documents rendered
    srt_rendered: RwLock<u64>,
    /// Requests rejected by the rate limiter
    rate_limited: RwLock<u64>,
    /// Errors by kind
    errors_by_kind: RwLock<HashMap<String, u64>>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            request_count: RwLock::new(0),
            requests_by_endpoint: RwLock::new(HashMap::new()),
            transcripts_fetched: RwLock::new(0),
            srt_rendered: RwLock::new(0),
            rate_limited: RwLock::new(0),
            errors_by_kind: RwLock::new(HashMap::new()),
        }
    }

    /// Record a request
    pub fn record_request(&self, endpoint: &str) {
        *self.request_count.write() += 1;
        *self
            .requests_by_endpoint
            .write()
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
    }

    /// Record a successful upstream fetch
    pub fn record_transcript(&self) {
        *self.transcripts_fetched.write() += 1;
    }

    /// Record a rendered SRT document
    pub fn record_srt(&self) {
        *self.srt_rendered.write() += 1;
    }

    /// Record a request rejected by the rate limiter
    pub fn record_rate_limited(&self) {
        *self.rate_limited.write() += 1;
    }

    /// Record error
    pub fn record_error(&self, kind: &str) {
        *self
            .errors_by_kind
            .write()
            .entry(kind.to_string())
            .or_insert(0) += 1;
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics in Prometheus format
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        output.push_str("# HELP transcript_server_uptime_seconds Server uptime in seconds\n");
        output.push_str("# TYPE transcript_server_uptime_seconds counter\n");
        output.push_str(&format!(
            "transcript_server_uptime_seconds {}\n",
            self.uptime_secs()
        ));

        output.push_str(
            "\n# HELP transcript_server_start_time_seconds Server start time as Unix timestamp\n",
        );
        output.push_str("# TYPE transcript_server_start_time_seconds gauge\n");
        output.push_str(&format!(
            "transcript_server_start_time_seconds {}\n",
            std::time::SystemTime::UNIX_EPOCH
                .elapsed()
                .unwrap_or(Duration::ZERO)
                .as_secs()
                .saturating_sub(self.uptime_secs())
        ));

        output.push_str("\n# HELP transcript_requests_total Total number of HTTP requests\n");
        output.push_str("# TYPE transcript_requests_total counter\n");
        output.push_str(&format!(
            "transcript_requests_total {}\n",
            *self.request_count.read()
        ));

        output.push_str("\n# HELP transcript_requests_by_endpoint Requests by endpoint\n");
        output.push_str("# TYPE transcript_requests_by_endpoint counter\n");
        let mut endpoints: Vec<_> = self
            .requests_by_endpoint
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        endpoints.sort();
        for (endpoint, count) in endpoints {
            output.push_str(&format!(
                "transcript_requests_by_endpoint{{endpoint=\"{}\"}} {}\n",
                endpoint, count
            ));
        }

        output.push_str("\n# HELP transcript_fetched_total Transcripts fetched from upstream\n");
        output.push_str("# TYPE transcript_fetched_total counter\n");
        output.push_str(&format!(
            "transcript_fetched_total {}\n",
            *self.transcripts_fetched.read()
        ));

        output.push_str("\n# HELP transcript_srt_rendered_total SRT documents rendered\n");
        output.push_str("# TYPE transcript_srt_rendered_total counter\n");
        output.push_str(&format!(
            "transcript_srt_rendered_total {}\n",
            *self.srt_rendered.read()
        ));

        output.push_str("\n# HELP transcript_rate_limited_total Requests rejected by rate limiting\n");
        output.push_str("# TYPE transcript_rate_limited_total counter\n");
        output.push_str(&format!(
            "transcript_rate_limited_total {}\n",
            *self.rate_limited.read()
        ));

        output.push_str("\n# HELP transcript_errors_total Total errors by kind\n");
        output.push_str("# TYPE transcript_errors_total counter\n");
        let mut errors: Vec<_> = self
            .errors_by_kind
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        errors.sort();
        for (kind, count) in errors {
            output.push_str(&format!(
                "transcript_errors_total{{kind=\"{}\"}} {}\n",
                kind, count
            ));
        }

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics endpoint handler
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let prometheus_output = state.metrics.export_prometheus();

    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        prometheus_output,
    )
        .into_response()
}
