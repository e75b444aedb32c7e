//! Integration tests for the analysis client
//!
//! Spins up a local stub engine and exercises the real multipart request
//! path: field encoding, success parsing, error statuses, bad JSON, and
//! transport failures.

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use speakfit_api::analysis::{AnalysisClient, AnalysisError, SpeechAnalyzer};
use speakfit_common::config::AnalysisConfig;
use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

/// Start a stub engine serving `POST /api/v1/transcribe` with the given
/// handler router; returns its base URL.
async fn start_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> AnalysisClient {
    AnalysisClient::new(&AnalysisConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap()
}

/// Scratch audio file with an MP3-looking header
fn temp_audio() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"ID3\x03\x00\x00\x00\x00\x00\x00fake-mp3-payload")
        .unwrap();
    file.flush().unwrap();
    file
}

/// Echoes the received form fields back inside the response transcription so
/// the test can assert what actually went over the wire.
async fn echo_transcribe(mut multipart: Multipart) -> Json<serde_json::Value> {
    let mut level = String::new();
    let mut category = String::new();
    let mut title = String::new();
    let mut filename = String::new();
    let mut file_bytes = 0usize;

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("level") => level = field.text().await.unwrap(),
            Some("category") => category = field.text().await.unwrap(),
            Some("title") => title = field.text().await.unwrap(),
            Some("file") => {
                filename = field.file_name().unwrap_or_default().to_string();
                file_bytes = field.bytes().await.unwrap().len();
            }
            _ => {}
        }
    }

    Json(json!({
        "text": format!("{}|{}|{}|{}|{}", level, category, title, filename, file_bytes),
        "confidence_score": 91,
        "overall_rating": "Excellent"
    }))
}

#[tokio::test]
async fn analyze_uploads_fields_and_parses_the_response() {
    let base_url = start_stub(Router::new().route("/api/v1/transcribe", post(echo_transcribe))).await;
    let client = client_for(&base_url);
    let audio = temp_audio();

    let response = client
        .analyze(audio.path(), "Beginner", "Public Speaking", "Intro", "talk.mp3")
        .await
        .unwrap();

    assert_eq!(response.confidence_score, 91.0);
    assert_eq!(response.overall_rating.as_deref(), Some("Excellent"));

    let parts: Vec<&str> = response.text.split('|').collect();
    assert_eq!(parts[0], "Beginner");
    assert_eq!(parts[1], "Public Speaking");
    assert_eq!(parts[2], "Intro");
    assert_eq!(parts[3], "talk.mp3");
    assert!(parts[4].parse::<usize>().unwrap() > 0);
}

#[tokio::test]
async fn non_success_status_yields_api_error_with_body() {
    async fn reject() -> impl IntoResponse {
        (StatusCode::BAD_REQUEST, "unsupported language")
    }
    let base_url = start_stub(Router::new().route("/api/v1/transcribe", post(reject))).await;
    let client = client_for(&base_url);
    let audio = temp_audio();

    let err = client
        .analyze(audio.path(), "Beginner", "Public Speaking", "Intro", "talk.mp3")
        .await
        .unwrap_err();

    match err {
        AnalysisError::Api(status, body) => {
            assert_eq!(status, 400);
            assert_eq!(body, "unsupported language");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn invalid_json_yields_parse_error() {
    async fn garbage() -> impl IntoResponse {
        (StatusCode::OK, "certainly not json")
    }
    let base_url = start_stub(Router::new().route("/api/v1/transcribe", post(garbage))).await;
    let client = client_for(&base_url);
    let audio = temp_audio();

    let err = client
        .analyze(audio.path(), "Beginner", "Public Speaking", "Intro", "talk.mp3")
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Parse(_)));
}

#[tokio::test]
async fn unreachable_engine_yields_network_error() {
    // Bind to learn a free port, then drop the listener before connecting
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    let audio = temp_audio();

    let err = client
        .analyze(audio.path(), "Beginner", "Public Speaking", "Intro", "talk.mp3")
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Network(_)));
    assert_eq!(err.http_status(), None);
}

#[tokio::test]
async fn slow_engine_times_out_as_network_error() {
    async fn stall() -> impl IntoResponse {
        tokio::time::sleep(Duration::from_secs(10)).await;
        (StatusCode::OK, "{}")
    }
    let base_url = start_stub(Router::new().route("/api/v1/transcribe", post(stall))).await;

    let client = AnalysisClient::new(&AnalysisConfig {
        base_url,
        timeout: Duration::from_millis(300),
    })
    .unwrap();
    let audio = temp_audio();

    let err = client
        .analyze(audio.path(), "Beginner", "Public Speaking", "Intro", "talk.mp3")
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Network(_)));
}

#[tokio::test]
async fn missing_audio_file_yields_io_error() {
    let base_url = start_stub(Router::new().route("/api/v1/transcribe", post(echo_transcribe))).await;
    let client = client_for(&base_url);

    let err = client
        .analyze(
            std::path::Path::new("/nonexistent/recording.mp3"),
            "Beginner",
            "Public Speaking",
            "Intro",
            "talk.mp3",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Io(_)));
}
