use crate::dtos::{HealthResponse, SERVICE_MESSAGE};
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Liveness plus the startup probe outcome. Never calls the provider.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running",
        provider_ready: state.readiness.is_ready(),
        message: SERVICE_MESSAGE.to_string(),
    })
}
