//! Server configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transcript retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Language codes tried, in order, when a request names none
    pub default_languages: Vec<String>,

    /// Keep HTML formatting tags (`<i>`, `<b>`) in transcript text
    pub preserve_formatting: bool,

    /// Upper bound on a single upstream fetch in seconds
    pub request_timeout_secs: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            default_languages: vec!["en".to_string()],
            preserve_formatting: false,
            request_timeout_secs: 30,
        }
    }
}

impl TranscriptConfig {
    /// Get the upstream timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Transcript configuration
    pub transcript: TranscriptConfig,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    /// Rate limit requests per second per client (off when unset)
    pub rate_limit_rps: Option<u32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            transcript: TranscriptConfig::default(),
            cors_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            rate_limit_rps: None,
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether logs should be emitted as JSON lines
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
