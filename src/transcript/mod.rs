//! Transcript retrieval module
//!
//! This module wraps the upstream transcript library behind a trait:
//! - `TranscriptSource` trait (YouTube implementation and test doubles)
//! - YouTube-backed source using `yt-transcript-rs`
//! - `TranscriptService` applying language defaults and the fetch timeout

pub mod service;
pub mod youtube;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::TranscriptError;
use crate::subtitle::Segment;

pub use service::TranscriptService;
pub use youtube::YouTubeSource;

/// A transcript track offered for a video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageInfo {
    /// Human-readable language name, e.g. "English (auto-generated)"
    pub language: String,
    /// Language code, e.g. "en"
    pub language_code: String,
    /// Whether the track was generated by speech recognition
    pub is_generated: bool,
}

/// A transcript as returned by a source
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedTranscript {
    pub video_id: String,
    /// Code of the language actually served
    pub language_code: String,
    pub segments: Vec<Segment>,
}

/// Source of transcript data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the first available transcript among `languages`, in order
    async fn fetch(
        &self,
        video_id: &str,
        languages: &[String],
        preserve_formatting: bool,
    ) -> Result<FetchedTranscript, TranscriptError>;

    /// List every transcript track the video offers
    async fn list_languages(&self, video_id: &str) -> Result<Vec<LanguageInfo>, TranscriptError>;
}
