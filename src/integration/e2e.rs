//! End-to-end integration tests

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::ServerConfig;
use crate::integration::fixtures::{FixtureSource, TestServer};

async fn start() -> TestServer {
    TestServer::start(FixtureSource::standard(), ServerConfig::default()).await
}

async fn get(server: &TestServer, path: &str) -> (StatusCode, Value) {
    let response = reqwest::get(server.url(path)).await.expect("request failed");
    let status = response.status();
    let body = response.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn test_srt_reference_output() {
    let server = start().await;
    let (status, body) = get(&server, "/api/srt/hello_world").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["video_id"], "hello_world");
    assert_eq!(
        body["srt_content"],
        "1\n00:00:00,000 --> 00:00:02,500\nHello\n\n2\n00:00:02,500 --> 00:00:03,500\nWorld\n\n"
    );
}

#[tokio::test]
async fn test_srt_long_video() {
    let server = start().await;
    let (status, body) = get(&server, "/api/srt/long_video").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["srt_content"],
        "1\n01:01:01,500 --> 01:01:03,500\nfirst line\nsecond line\n\n\
         2\n10:00:00,000 --> 10:00:00,750\nmuch later\n\n"
    );
}

#[tokio::test]
async fn test_srt_language_selection() {
    let server = start().await;
    let (status, body) = get(&server, "/api/srt/hello_world?language=de").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["srt_content"],
        "1\n00:00:00,000 --> 00:00:03,500\nHallo Welt\n\n"
    );
}

#[tokio::test]
async fn test_transcript_json() {
    let server = start().await;

    let (status, body) = get(&server, "/api/transcript/hello_world").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "auto");
    let transcript = body["transcript"].as_array().unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0]["text"], "Hello");
    assert_eq!(transcript[0]["duration"], 2.5);

    let (status, body) = get(&server, "/api/transcript/hello_world?language=de").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "de");
}

#[tokio::test]
async fn test_languages() {
    let server = start().await;
    let (status, body) = get(&server, "/api/languages/hello_world").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["video_id"], "hello_world");
    let languages = body["available_languages"].as_array().unwrap();
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[1]["language_code"], "de");
    assert_eq!(languages[1]["is_generated"], true);
}

#[tokio::test]
async fn test_missing_language_is_404() {
    let server = start().await;
    let (status, body) = get(&server, "/api/srt/hello_world?language=ja").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("No transcripts"));
}

#[tokio::test]
async fn test_disabled_is_404() {
    let server = start().await;
    for path in [
        "/api/transcript/disabled",
        "/api/srt/disabled",
        "/api/languages/disabled",
    ] {
        let (status, _) = get(&server, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
async fn test_upstream_failure_is_500() {
    let server = start().await;
    let (status, body) = get(&server, "/api/srt/broken").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("Upstream error"));

    let metrics = reqwest::get(server.url("/metrics"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(metrics.contains("transcript_errors_total{kind=\"upstream\"} 1"));
    assert!(metrics.contains("endpoint=\"/api/srt/{video_id}\""));
}

#[tokio::test]
async fn test_rate_limited_per_client() {
    let config = ServerConfig {
        rate_limit_rps: Some(2),
        ..Default::default()
    };
    let server = TestServer::start(FixtureSource::standard(), config).await;

    let (first, _) = get(&server, "/api/srt/hello_world").await;
    let (second, _) = get(&server, "/api/srt/hello_world").await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(server.state.rate_limiter.as_ref().unwrap().client_count(), 1);
}
