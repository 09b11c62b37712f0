use crate::dtos::ConnectivityResponse;
use crate::services::providers::generate_with_timeout;
use crate::services::Readiness;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Prompt used for the live connectivity check.
pub const CONNECTIVITY_PROMPT: &str = "Say: 'Gemini AI is working with Contract Guard'";

/// Issue one live prompt when the provider was ready at startup.
///
/// Provider failures are reported in the body; the status code is always 200.
pub async fn connectivity_test(State(state): State<AppState>) -> Json<ConnectivityResponse> {
    if let Readiness::Degraded { reason } = &state.readiness {
        tracing::debug!(%reason, "Connectivity test skipped, provider not ready");
        return Json(ConnectivityResponse {
            success: false,
            message: format!("Provider '{}' not available", state.provider.name()),
            model: None,
        });
    }

    match generate_with_timeout(
        state.provider.as_ref(),
        CONNECTIVITY_PROMPT,
        state.config.provider.timeout(),
    )
    .await
    {
        Ok(response) => Json(ConnectivityResponse {
            success: true,
            message: response.text,
            model: Some(state.provider.model().to_string()),
        }),
        Err(e) => Json(ConnectivityResponse {
            success: false,
            message: format!("Provider test failed: {}", e),
            model: None,
        }),
    }
}
