//! Test fixtures for integration tests
//!
//! Provides an in-memory transcript source and a helper that runs the full
//! router on a loopback listener.

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::TranscriptError;
use crate::http::create_router;
use crate::state::AppState;
use crate::subtitle::Segment;
use crate::transcript::{FetchedTranscript, LanguageInfo, TranscriptSource};

/// Canned data for one video
#[derive(Debug, Clone)]
pub enum TestVideo {
    /// Tracks keyed by language code, in the order they are offered
    Available(Vec<(LanguageInfo, Vec<Segment>)>),
    /// Uploader turned transcripts off
    Disabled,
    /// Upstream fails with a transport-level error
    Broken,
}

/// In-memory transcript source
#[derive(Debug, Default)]
pub struct FixtureSource {
    videos: HashMap<String, TestVideo>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, video_id: &str, video: TestVideo) -> Self {
        self.videos.insert(video_id.to_string(), video);
        self
    }

    /// The reference two-cue English transcript plus a German track
    pub fn standard() -> Self {
        Self::new()
            .with_video(
                "hello_world",
                TestVideo::Available(vec![
                    (
                        track("English", "en", false),
                        vec![
                            Segment::new(0.0, 2.5, "Hello"),
                            Segment::new(2.5, 1.0, "World"),
                        ],
                    ),
                    (
                        track("German (auto-generated)", "de", true),
                        vec![Segment::new(0.0, 3.5, "Hallo Welt")],
                    ),
                ]),
            )
            .with_video(
                "long_video",
                TestVideo::Available(vec![(
                    track("English", "en", false),
                    vec![
                        Segment::new(3661.5, 2.0, "first line\nsecond line"),
                        Segment::new(36_000.0, 0.75, "much later"),
                    ],
                )]),
            )
            .with_video("disabled", TestVideo::Disabled)
            .with_video("broken", TestVideo::Broken)
    }

    fn lookup(&self, video_id: &str) -> Result<&[(LanguageInfo, Vec<Segment>)], TranscriptError> {
        match self.videos.get(video_id) {
            Some(TestVideo::Available(tracks)) => Ok(tracks),
            Some(TestVideo::Disabled) => Err(TranscriptError::NotFound(format!(
                "Subtitles are disabled for this video: {}",
                video_id
            ))),
            Some(TestVideo::Broken) => Err(TranscriptError::Upstream(format!(
                "Request to YouTube failed: {}",
                video_id
            ))),
            None => Err(TranscriptError::Upstream(format!(
                "The video is no longer available: {}",
                video_id
            ))),
        }
    }
}

#[async_trait]
impl TranscriptSource for FixtureSource {
    async fn fetch(
        &self,
        video_id: &str,
        languages: &[String],
        _preserve_formatting: bool,
    ) -> Result<FetchedTranscript, TranscriptError> {
        let tracks = self.lookup(video_id)?;

        languages
            .iter()
            .find_map(|code| {
                tracks
                    .iter()
                    .find(|(info, _)| &info.language_code == code)
            })
            .map(|(info, segments)| FetchedTranscript {
                video_id: video_id.to_string(),
                language_code: info.language_code.clone(),
                segments: segments.clone(),
            })
            .ok_or_else(|| {
                TranscriptError::NotFound(format!(
                    "No transcripts were found for any of the requested language codes: {:?}",
                    languages
                ))
            })
    }

    async fn list_languages(&self, video_id: &str) -> Result<Vec<LanguageInfo>, TranscriptError> {
        Ok(self
            .lookup(video_id)?
            .iter()
            .map(|(info, _)| info.clone())
            .collect())
    }
}

fn track(language: &str, code: &str, is_generated: bool) -> LanguageInfo {
    LanguageInfo {
        language: language.to_string(),
        language_code: code.to_string(),
        is_generated,
    }
}

/// A server running on a loopback port for the duration of a test
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and serve the full router in the background
    pub async fn start(source: FixtureSource, config: ServerConfig) -> Self {
        let state = Arc::new(AppState::new(config, Arc::new(source)));
        let app = create_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("test server failed");
        });

        Self { addr, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}
