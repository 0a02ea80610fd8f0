//! Per-client rate limiting
//!
//! Every upstream call costs a request to YouTube, which blocks clients that
//! ask too often. A token bucket per client IP keeps bursts in check.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::TranscriptError;
use crate::state::AppState;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests per second limit
    pub requests_per_second: u32,
    /// Burst size
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// Derive the burst size from the sustained rate (half of it, at least one)
    pub fn from_rps(requests_per_second: u32) -> Self {
        Self {
            requests_per_second,
            burst_size: (requests_per_second / 2).max(1),
        }
    }
}

/// Token bucket rate limiter
#[derive(Debug)]
pub struct TokenBucket {
    /// Maximum tokens (burst size)
    max_tokens: f64,
    /// Current tokens
    tokens: f64,
    /// Tokens added per second
    refill_rate: f64,
    /// Last refill time
    last_refill: Instant,
}

impl TokenBucket {
    pub fn new(max_tokens: u32, refill_rate: u32) -> Self {
        Self {
            max_tokens: max_tokens as f64,
            tokens: max_tokens as f64,
            refill_rate: refill_rate as f64,
            last_refill: Instant::now(),
        }
    }

    /// Try to consume a token
    pub fn try_consume(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Refill tokens based on elapsed time
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();

        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.max_tokens);
        self.last_refill = now;
    }
}

/// Rate limiter state
#[derive(Debug)]
pub struct RateLimiter {
    /// Per-IP buckets
    limiters: RwLock<HashMap<IpAddr, TokenBucket>>,
    /// Configuration
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Check if request is allowed
    pub fn is_allowed(&self, ip: IpAddr) -> bool {
        let mut limiters = self.limiters.write();

        let limiter = limiters.entry(ip).or_insert_with(|| {
            TokenBucket::new(self.config.burst_size, self.config.requests_per_second)
        });

        limiter.try_consume()
    }

    /// Drop buckets idle for longer than `max_age`, returning how many went
    pub fn cleanup(&self, max_age: Duration) -> usize {
        let mut limiters = self.limiters.write();
        let now = Instant::now();
        let before = limiters.len();

        limiters.retain(|_, limiter| now.duration_since(limiter.last_refill) < max_age);
        before - limiters.len()
    }

    /// Number of tracked clients
    pub fn client_count(&self) -> usize {
        self.limiters.read().len()
    }
}

/// Rate limiting middleware
///
/// Passes everything through when the server runs without a limit.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = state.rate_limiter.as_ref() else {
        return next.run(request).await;
    };

    // Connection info is absent when the router is driven without a listener
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !limiter.is_allowed(ip) {
        tracing::warn!("Rate limit exceeded for {}", ip);
        state.metrics.record_rate_limited();
        return TranscriptError::RateLimited.into_response();
    }

    next.run(request).await
}

/// Create rate limiter from config
pub fn create_rate_limiter(config: &crate::config::ServerConfig) -> Option<Arc<RateLimiter>> {
    config
        .rate_limit_rps
        .filter(|rps| *rps > 0)
        .map(|rps| Arc::new(RateLimiter::new(RateLimitConfig::from_rps(rps))))
}
