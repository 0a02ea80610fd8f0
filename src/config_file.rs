//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{ServerConfig, TranscriptConfig};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Transcript settings
    pub transcript: Option<TranscriptSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
    /// Limits settings
    pub limits: Option<LimitsSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSettings {
    /// Fallback language codes, in priority order
    pub default_languages: Option<Vec<String>>,
    /// Keep HTML formatting tags in transcript text
    pub preserve_formatting: Option<bool>,
    /// Upstream fetch timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Rate limit requests per second per client
    pub rate_limit_rps: Option<u32>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let transcript = TranscriptConfig::default();
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8000,
                cors_enabled: Some(true),
            },
            transcript: Some(TranscriptSettings {
                default_languages: Some(transcript.default_languages),
                preserve_formatting: Some(transcript.preserve_formatting),
                request_timeout_secs: Some(transcript.request_timeout_secs),
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
            limits: None,
        }
    }

    /// Convert to ServerConfig, filling unset values from defaults
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();

        let transcript = match self.transcript {
            Some(t) => TranscriptConfig {
                default_languages: t
                    .default_languages
                    .filter(|langs| !langs.is_empty())
                    .unwrap_or(defaults.transcript.default_languages),
                preserve_formatting: t
                    .preserve_formatting
                    .unwrap_or(defaults.transcript.preserve_formatting),
                request_timeout_secs: t
                    .request_timeout_secs
                    .unwrap_or(defaults.transcript.request_timeout_secs),
            },
            None => defaults.transcript,
        };

        let (log_level, log_format) = match self.logging {
            Some(l) => (l.level, l.format.unwrap_or(defaults.log_format)),
            None => (defaults.log_level, defaults.log_format),
        };

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            transcript,
            cors_enabled: self.server.cors_enabled.unwrap_or(defaults.cors_enabled),
            log_level,
            log_format,
            rate_limit_rps: match self.limits {
                Some(l) => l.rate_limit_rps,
                None => defaults.rate_limit_rps,
            },
        }
    }
}

/// Load the server configuration from `path`.
///
/// A missing file yields defaults. An unreadable or invalid file also yields
/// defaults, together with the reason so the caller can report it once
/// logging is up.
pub fn load_server_config<P: AsRef<Path>>(path: P) -> (ServerConfig, Option<String>) {
    let path = path.as_ref();
    if !path.exists() {
        return (ServerConfig::default(), None);
    }

    match ConfigFile::from_file(path) {
        Ok(cf) => (cf.into_server_config(), None),
        Err(e) => (
            ServerConfig::default(),
            Some(format!(
                "Failed to load config file {}: {}. Using defaults.",
                path.display(),
                e
            )),
        ),
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
