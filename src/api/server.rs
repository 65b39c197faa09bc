//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::handlers;
use crate::config::Config;
use crate::error::Error;

/// Shared application state: read-only configuration, loaded once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Configure and start the HTTP server
pub async fn start_http_server(config: Arc<Config>, port: u16) -> Result<()> {
    info!("🚀 Starting HTTP server on port {}", port);

    let app = build_router(config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("🌐 API server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router with routes and middleware
pub fn build_router(config: Arc<Config>) -> Router {
    let app_state = AppState { config };

    // Configure CORS to allow browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health check endpoints (both paths for compatibility)
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        // Coverage analysis endpoint
        .route("/api/analyze", post(analyze_handler))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::health_check(&state.config).await))
}

/// Analysis handler
async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    match handlers::analyze(&state.config, &payload).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

/// Shape the error surface: validation failures are the client's fault,
/// everything else is a 500
fn error_response(err: &Error) -> (StatusCode, Json<serde_json::Value>) {
    let (status, label) = match err {
        Error::Validation(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to analyze video"),
    };

    (
        status,
        Json(serde_json::json!({
            "error": label,
            "details": err.to_string(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_mapping() {
        let (status, _) = error_response(&Error::Validation("bad".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(&Error::Upstream("down".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = error_response(&Error::NotFound("gone".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, body) = error_response(&Error::Provider("flaky".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0["error"], "Failed to analyze video");
    }
}
