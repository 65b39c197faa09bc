use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use coverage_analyzer_rust::api::build_router;
use coverage_analyzer_rust::config::Config;

fn router() -> axum::Router {
    build_router(Arc::new(Config::default()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn analyze_request(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = router()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["service"], json!("coverage-analyzer"));
    // Default config carries no credentials
    assert_eq!(body["credentials"]["youtubeApiKey"], json!(false));
    assert_eq!(body["credentials"]["groqApiKey"], json!(false));
    assert_eq!(body["credentials"]["geminiApiKey"], json!(false));
}

#[tokio::test]
async fn test_health_alias_path() {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_missing_fields_is_400() {
    let response = router()
        .oneshot(analyze_request(&json!({"topic": "photosynthesis"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Invalid request"));
    assert!(body["details"].as_str().unwrap().contains("youtubeUrl"));
}

#[tokio::test]
async fn test_analyze_empty_subtopics_is_400() {
    let response = router()
        .oneshot(analyze_request(&json!({
            "youtubeUrl": "https://youtu.be/dQw4w9WgXcQ",
            "topic": "photosynthesis",
            "customSubtopics": []
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_unparseable_url_is_400() {
    let response = router()
        .oneshot(analyze_request(&json!({
            "youtubeUrl": "https://example.com/watch?v=nope",
            "topic": "photosynthesis",
            "customSubtopics": ["light reactions"]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Invalid request"));
}

#[tokio::test]
async fn test_analyze_without_credentials_is_500_not_a_crash() {
    // No YouTube API key configured: the metadata call is the first
    // upstream step and its configuration error surfaces as a 500.
    let response = router()
        .oneshot(analyze_request(&json!({
            "youtubeUrl": "https://youtu.be/dQw4w9WgXcQ",
            "topic": "photosynthesis",
            "customSubtopics": ["light reactions"]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Failed to analyze video"));
    assert!(body["details"].as_str().unwrap().contains("YOUTUBE_API_KEY"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = router()
        .oneshot(Request::builder().uri("/api/unknown").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
