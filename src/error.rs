//! Error types
//!
//! `TranscriptError` is the closed set of request-level failures; it is
//! translated to an HTTP status in exactly one place
//! ([`TranscriptError::status_code`]). `ServerError` covers startup.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::subtitle::SegmentError;

/// Request-level failure kinds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscriptError {
    /// Transcripts are disabled for the video, or none match the request
    #[error("Transcript not found: {0}")]
    NotFound(String),

    /// Any other failure talking to YouTube (network, parsing, timeout)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Data that cannot be turned into subtitles
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client exceeded the configured request rate
    #[error("Rate limit exceeded")]
    RateLimited,
}

impl TranscriptError {
    /// HTTP status for each error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            TranscriptError::NotFound(_) => StatusCode::NOT_FOUND,
            TranscriptError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TranscriptError::InvalidInput(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TranscriptError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            TranscriptError::NotFound(_) => "not_found",
            TranscriptError::Upstream(_) => "upstream",
            TranscriptError::InvalidInput(_) => "invalid_input",
            TranscriptError::RateLimited => "rate_limited",
        }
    }
}

impl From<SegmentError> for TranscriptError {
    fn from(err: SegmentError) -> Self {
        TranscriptError::InvalidInput(err.to_string())
    }
}

impl IntoResponse for TranscriptError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Server startup errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
