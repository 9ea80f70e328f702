//! Health check endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Basic health check (is the server running?)
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    active: bool,
    leader: bool,
}

/// Readiness check: 503 unless the conductor is active
pub async fn ready_check(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, StatusCode> {
    let active = matches!(state.api.active().await, Ok(true));
    if !active {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let leader = matches!(state.api.leader().await, Ok(true));

    Ok(Json(ReadyResponse {
        status: "ready",
        active,
        leader,
    }))
}
