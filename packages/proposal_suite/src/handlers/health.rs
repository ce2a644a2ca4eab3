use axum::{Json, extract::State, response::IntoResponse};

use crate::AppState;
use crate::metrics;

/// Health check endpoint - returns server status
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(metrics::HealthStatus {
        status: "healthy".to_string(),
        assistants: state.registry.assistants().len(),
        active_sessions: state.sessions.active_sessions().await,
        uptime_secs: state.metrics.uptime_secs(),
    })
}

/// Metrics endpoint - returns counters
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

/// Liveness probe - returns 200 if the server is running
pub async fn health_live_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "alive" }))
}
