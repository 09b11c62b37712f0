use crate::dtos::{AnalyzeRequest, AnalyzeResponse};
use crate::services::analysis::analyze_contract;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use service_core::error::AppError;

/// Analyze contract text with the provider, or the fallback in degraded mode.
///
/// Validation failures are 400 and never reach the provider. A provider
/// failure on a ready service is a 500 carrying the failure description.
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected analysis request body");
        AppError::BadRequest(anyhow::anyhow!("No data received"))
    })?;

    let submission = AnalyzeRequest::from_body(body)?.into_submission()?;

    tracing::info!(
        analysis_type = %submission.analysis_type,
        length = submission.text_length(),
        provider_ready = state.readiness.is_ready(),
        "Analysis request"
    );

    match analyze_contract(&state, &submission).await {
        Ok(result) => {
            metrics::record_analysis(result.status.as_str());
            Ok(Json(AnalyzeResponse::from(result)))
        }
        Err(e) => {
            metrics::record_analysis("error");
            tracing::error!(error = %e, "Contract analysis failed");
            Err(AppError::UpstreamFailure(e.to_string()))
        }
    }
}
