//! Integration tests for spp-ui API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Prediction happy path, idempotence, and boundary domains
//! - Incomplete / out-of-range submissions (no inference attempted)
//! - Result export payload
//! - Pipeline information display

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use spp_ui::pipeline::Pipeline;
use spp_ui::{build_router, AppState};
use std::io::Write;
use tower::util::ServiceExt; // for `oneshot` method

/// Artifact fixture: centers every column, then scores with a known
/// intercept so expected values are exact.
const CENTERED_ARTIFACT: &str = r#"{
    "metadata": {"version": "1.0.0", "trained_at": "2024-11-01"},
    "stages": [
        {"name": "scaler", "kind": "standard_scaler",
         "means": [0, 0, 0, 0, 0, 0, 0],
         "scales": [1000, 1, 1, 1, 1, 10, 1]},
        {"name": "regressor", "kind": "linear_regression",
         "coefficients": [0, 0, 0, 0, 0, 0, 0], "intercept": 42.5}
    ]
}"#;

/// Artifact fixture with no stages at all. Any inference against it fails,
/// so a non-500 response proves the predictor was never invoked.
const STUB_ARTIFACT: &str = r#"{
    "metadata": {"version": "0.0.0", "trained_at": "never"},
    "stages": []
}"#;

/// Test helper: load a pipeline from artifact JSON
fn load_pipeline(artifact: &str) -> Pipeline {
    let mut file = tempfile::NamedTempFile::new().expect("Should create temp artifact");
    file.write_all(artifact.as_bytes())
        .expect("Should write artifact");
    Pipeline::load(file.path()).expect("Should load artifact")
}

/// Test helper: create app around an artifact fixture
fn setup_app(artifact: &str) -> axum::Router {
    let state = AppState::new(load_pipeline(artifact));
    build_router(state)
}

/// Test helper: GET request
fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: POST /api/predict with a JSON body
fn predict_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: complete, in-domain feature set
fn complete_features() -> Value {
    json!({
        "duration_ms": 210000,
        "acousticness": 0.42,
        "danceability": 0.71,
        "liveness": 0.11,
        "loudness_db": -7.3,
        "tempo_bpm": 128.0,
        "audio_valence": 0.56
    })
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: extract raw text body from response
async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(CENTERED_ARTIFACT);

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "spp-ui");
    assert!(body["version"].is_string());
    assert_eq!(body["model_version"], "1.0.0");
}

// =============================================================================
// Prediction Tests
// =============================================================================

#[tokio::test]
async fn test_predict_happy_path() {
    let app = setup_app(CENTERED_ARTIFACT);

    let request = predict_request(&json!({
        "song_name": "Test Song",
        "features": complete_features()
    }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["song_name"], "Test Song");
    assert_eq!(body["score"], 42.5);
}

#[tokio::test]
async fn test_predict_without_song_name() {
    let app = setup_app(CENTERED_ARTIFACT);

    let request = predict_request(&json!({ "features": complete_features() }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["song_name"], Value::Null);
    assert_eq!(body["score"], 42.5);
}

#[tokio::test]
async fn test_predict_is_idempotent() {
    let app = setup_app(CENTERED_ARTIFACT);

    let mut scores = Vec::new();
    for _ in 0..2 {
        let request = predict_request(&json!({ "features": complete_features() }));
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        scores.push(body["score"].as_f64().unwrap());
    }
    assert_eq!(scores[0], scores[1]);
}

#[tokio::test]
async fn test_predict_missing_field_skips_inference() {
    // Stub pipeline errors on any inference, so the 400 (not 500) proves
    // the predictor was never invoked for an incomplete submission.
    let app = setup_app(STUB_ARTIFACT);

    let mut features = complete_features();
    features["tempo_bpm"] = Value::Null;
    let request = predict_request(&json!({ "features": features }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("fill in all fields"), "got: {}", message);
    assert!(message.contains("tempo_bpm"), "got: {}", message);
}

#[tokio::test]
async fn test_predict_duration_boundaries() {
    for (duration, expected) in [
        (json!(100), StatusCode::OK),
        (json!(300000), StatusCode::OK),
        (json!(99), StatusCode::BAD_REQUEST),
        (json!(300001), StatusCode::BAD_REQUEST),
    ] {
        let app = setup_app(CENTERED_ARTIFACT);
        let mut features = complete_features();
        features["duration_ms"] = duration.clone();
        let request = predict_request(&json!({ "features": features }));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            expected,
            "duration_ms = {} gave unexpected status",
            duration
        );
    }
}

#[tokio::test]
async fn test_predict_out_of_range_reports_field() {
    let app = setup_app(CENTERED_ARTIFACT);

    let mut features = complete_features();
    features["loudness_db"] = json!(5.0);
    let request = predict_request(&json!({ "features": features }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("loudness_db"));
}

#[tokio::test]
async fn test_predict_inference_failure_is_reported_not_fatal() {
    let app = setup_app(STUB_ARTIFACT);

    // Complete, valid features against a stageless pipeline: inference fails
    let request = predict_request(&json!({ "features": complete_features() }));
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Error during prediction"));

    // Service still answers after the failed submission
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Export Tests
// =============================================================================

#[tokio::test]
async fn test_export_round_trip() {
    let app = setup_app(CENTERED_ARTIFACT);

    let response = app
        .oneshot(get_request("/api/export?song_name=Test%20Song&score=42.5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"prediction_results.txt\""
    );

    let text = extract_text(response.into_body()).await;
    assert_eq!(text, "Song Name: Test Song\nPredicted Popularity: 42.5");
}

#[tokio::test]
async fn test_export_unnamed_fallback() {
    let app = setup_app(CENTERED_ARTIFACT);

    let response = app
        .oneshot(get_request("/api/export?score=10"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let text = extract_text(response.into_body()).await;
    assert_eq!(text, "Song Name: Unnamed Song\nPredicted Popularity: 10");
}

#[tokio::test]
async fn test_export_blank_name_fallback() {
    let app = setup_app(CENTERED_ARTIFACT);

    let response = app
        .oneshot(get_request("/api/export?song_name=&score=10"))
        .await
        .unwrap();

    let text = extract_text(response.into_body()).await;
    assert!(text.starts_with("Song Name: Unnamed Song"));
}

// =============================================================================
// Pipeline Information Tests
// =============================================================================

#[tokio::test]
async fn test_pipeline_info_lists_stages_and_features() {
    let app = setup_app(CENTERED_ARTIFACT);

    let response = app.oneshot(get_request("/api/pipeline")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["model"]["version"], "1.0.0");
    assert_eq!(body["model"]["trained_at"], "2024-11-01");

    let stages = body["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0]["name"], "scaler");
    assert_eq!(stages[1]["name"], "regressor");

    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), 7);
    assert_eq!(features[0]["name"], "duration_ms");
    assert_eq!(features[0]["min"], 100.0);
    assert_eq!(features[0]["max"], 300000.0);
}

// =============================================================================
// Build Information Tests
// =============================================================================

#[tokio::test]
async fn test_buildinfo_reports_identification() {
    let app = setup_app(CENTERED_ARTIFACT);

    let response = app.oneshot(get_request("/api/buildinfo")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["version"].is_string());
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].is_string());
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// UI Serving Tests
// =============================================================================

#[tokio::test]
async fn test_index_page_served() {
    let app = setup_app(CENTERED_ARTIFACT);

    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let text = extract_text(response.into_body()).await;
    assert!(text.contains("Song Popularity Predictor"));
}

#[tokio::test]
async fn test_app_js_served() {
    let app = setup_app(CENTERED_ARTIFACT);

    let response = app.oneshot(get_request("/static/app.js")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/javascript"
    );
}
