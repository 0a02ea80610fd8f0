//! HTTP request handlers
//!
//! Implements handlers for the transcript API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::TranscriptError;
use crate::state::AppState;
use crate::subtitle::Segment;
use crate::transcript::LanguageInfo;

/// Optional `?language=` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub video_id: String,
    pub language: String,
    pub transcript: Vec<Segment>,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub video_id: String,
    pub available_languages: Vec<LanguageInfo>,
}

#[derive(Debug, Serialize)]
pub struct SrtResponse {
    pub video_id: String,
    pub srt_content: String,
}

/// Count failed requests by kind before they reach the client
fn tracked<T>(state: &AppState, result: Result<T, TranscriptError>) -> Result<T, TranscriptError> {
    if let Err(e) = &result {
        state.metrics.record_error(e.kind());
    }
    result
}

/// Welcome endpoint
/// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to the YouTube transcript API" }))
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Version information endpoint
pub async fn version_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "online",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Unknown routes
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "detail": "Not Found" })),
    )
}

/// Transcript endpoint
/// GET /api/transcript/{video_id}?language=xx
pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<TranscriptResponse>, TranscriptError> {
    let language = state.transcripts.resolve_language(query.language.as_deref());
    let transcript = tracked(
        &state,
        state.transcripts.transcript(&video_id, &language).await,
    )?;
    state.metrics.record_transcript();

    Ok(Json(TranscriptResponse {
        video_id,
        language: language.label,
        transcript: transcript.segments,
    }))
}

/// Available languages endpoint
/// GET /api/languages/{video_id}
pub async fn get_languages(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Json<LanguagesResponse>, TranscriptError> {
    let available_languages = tracked(&state, state.transcripts.languages(&video_id).await)?;

    Ok(Json(LanguagesResponse {
        video_id,
        available_languages,
    }))
}

/// SRT endpoint
/// GET /api/srt/{video_id}?language=xx
pub async fn get_srt(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<SrtResponse>, TranscriptError> {
    let language = state.transcripts.resolve_language(query.language.as_deref());
    let srt_content = tracked(&state, state.transcripts.srt(&video_id, &language).await)?;
    state.metrics.record_transcript();
    state.metrics.record_srt();

    Ok(Json(SrtResponse {
        video_id,
        srt_content,
    }))
}
