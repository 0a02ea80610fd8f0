//! YouTube transcript source backed by `yt-transcript-rs`

use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

use super::{FetchedTranscript, LanguageInfo, TranscriptSource};
use crate::error::TranscriptError;
use crate::subtitle::{Segment, SegmentError};

/// Transcript source talking to YouTube
#[derive(Clone)]
pub struct YouTubeSource {
    api: YouTubeTranscriptApi,
}

impl YouTubeSource {
    /// Create a source with the library's default HTTP client
    pub fn new() -> Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TranscriptError::Upstream(format!("Failed to create YouTube client: {}", e))
        })?;
        Ok(Self { api })
    }
}

#[async_trait]
impl TranscriptSource for YouTubeSource {
    async fn fetch(
        &self,
        video_id: &str,
        languages: &[String],
        preserve_formatting: bool,
    ) -> Result<FetchedTranscript, TranscriptError> {
        let languages: Vec<&str> = languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, preserve_formatting)
            .await
            .map_err(classify)?;

        let segments = transcript
            .snippets
            .into_iter()
            .enumerate()
            .map(|(i, snippet)| Segment::checked(i + 1, snippet.start, snippet.duration, snippet.text))
            .collect::<Result<Vec<_>, SegmentError>>()?;

        tracing::debug!(
            "Fetched {} segments for {} ({})",
            segments.len(),
            video_id,
            transcript.language_code
        );

        Ok(FetchedTranscript {
            video_id: video_id.to_string(),
            language_code: transcript.language_code,
            segments,
        })
    }

    async fn list_languages(&self, video_id: &str) -> Result<Vec<LanguageInfo>, TranscriptError> {
        let list = self
            .api
            .list_transcripts(video_id)
            .await
            .map_err(classify)?;

        let mut languages: Vec<LanguageInfo> = list
            .transcripts()
            .map(|t| LanguageInfo {
                language: t.language().to_string(),
                language_code: t.language_code().to_string(),
                is_generated: t.is_generated(),
            })
            .collect();

        // Manual tracks first, like YouTube's own menu
        languages.sort_by(|a, b| {
            a.is_generated
                .cmp(&b.is_generated)
                .then_with(|| a.language_code.cmp(&b.language_code))
        });

        Ok(languages)
    }
}

/// Map library failures onto request error kinds.
fn classify(err: CouldNotRetrieveTranscript) -> TranscriptError {
    match err.reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled { .. })
        | Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
            TranscriptError::NotFound(err.to_string())
        }
        _ => TranscriptError::Upstream(err.to_string()),
    }
}
