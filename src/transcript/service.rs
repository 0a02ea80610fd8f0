//! Transcript service
//!
//! Sits between the HTTP handlers and a [`TranscriptSource`]: resolves the
//! requested language, bounds each upstream call with a timeout and renders
//! SRT output.

use std::sync::Arc;

use super::{FetchedTranscript, LanguageInfo, TranscriptSource};
use crate::config::TranscriptConfig;
use crate::error::TranscriptError;
use crate::subtitle::format_segments;

/// Language label reported when the caller did not pick one
pub const AUTO_LANGUAGE: &str = "auto";

/// Language selection for a single request
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRequest {
    /// Codes handed to the source, in priority order
    pub codes: Vec<String>,
    /// Value echoed back to the client
    pub label: String,
}

#[derive(Clone)]
pub struct TranscriptService {
    source: Arc<dyn TranscriptSource>,
    config: TranscriptConfig,
}

impl TranscriptService {
    pub fn new(source: Arc<dyn TranscriptSource>, config: TranscriptConfig) -> Self {
        Self { source, config }
    }

    /// Resolve an optional `language` query value.
    ///
    /// Blank values count as absent and fall back to the configured defaults.
    pub fn resolve_language(&self, language: Option<&str>) -> LanguageRequest {
        match language.map(str::trim).filter(|l| !l.is_empty()) {
            Some(code) => LanguageRequest {
                codes: vec![code.to_string()],
                label: code.to_string(),
            },
            None => LanguageRequest {
                codes: self.config.default_languages.clone(),
                label: AUTO_LANGUAGE.to_string(),
            },
        }
    }

    /// Fetch the transcript of `video_id` in the requested language
    pub async fn transcript(
        &self,
        video_id: &str,
        language: &LanguageRequest,
    ) -> Result<FetchedTranscript, TranscriptError> {
        tracing::info!(
            "Fetching transcript for {} (languages: {:?})",
            video_id,
            language.codes
        );

        self.with_timeout(
            video_id,
            self.source
                .fetch(video_id, &language.codes, self.config.preserve_formatting),
        )
        .await
    }

    /// List the transcript tracks of `video_id`
    pub async fn languages(&self, video_id: &str) -> Result<Vec<LanguageInfo>, TranscriptError> {
        tracing::info!("Listing transcript languages for {}", video_id);

        self.with_timeout(video_id, self.source.list_languages(video_id))
            .await
    }

    /// Fetch the transcript of `video_id` and render it as SRT
    pub async fn srt(
        &self,
        video_id: &str,
        language: &LanguageRequest,
    ) -> Result<String, TranscriptError> {
        let transcript = self.transcript(video_id, language).await?;
        Ok(format_segments(&transcript.segments))
    }

    async fn with_timeout<T>(
        &self,
        video_id: &str,
        call: impl std::future::Future<Output = Result<T, TranscriptError>>,
    ) -> Result<T, TranscriptError> {
        let timeout = self.config.request_timeout();
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Upstream request for {} timed out after {:?}", video_id, timeout);
                Err(TranscriptError::Upstream(format!(
                    "request for {} timed out after {}s",
                    video_id,
                    timeout.as_secs()
                )))
            }
        }
    }
}
