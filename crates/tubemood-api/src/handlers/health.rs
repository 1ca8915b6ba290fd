//! Health check handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub model: ModelCheck,
}

#[derive(Serialize)]
pub struct ModelCheck {
    /// Model new classification calls will use
    pub current: String,
    /// Whether the process has switched to the fallback model
    pub degraded: bool,
}

/// Readiness check endpoint (readiness probe).
///
/// Still ready when running on the fallback model, but reported as degraded.
pub async fn ready(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let degraded = state.model_state.is_degraded();

    Json(ReadinessResponse {
        status: if degraded { "degraded" } else { "ready" }.to_string(),
        checks: ReadinessChecks {
            model: ModelCheck {
                current: state.analyzer.model_name(),
                degraded,
            },
        },
    })
}
