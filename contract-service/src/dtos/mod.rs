//! Wire types for the JSON API.

use crate::models::analysis::DEFAULT_ANALYSIS_TYPE;
use crate::models::{AnalysisResult, AnalysisStatus, ContractSubmission};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;

/// Message shown on the health endpoint and landing page.
pub const SERVICE_MESSAGE: &str = "Contract Guard API";

/// Raw analysis request. Fields stay untyped so that wrong types are reported
/// as validation errors, not as body parse failures.
///
/// camelCase wins when a body carries both spellings of a field.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, rename = "contractText")]
    pub contract_text: Option<Value>,
    #[serde(default, rename = "contract_text")]
    pub contract_text_snake: Option<Value>,
    #[serde(default, rename = "analysisType")]
    pub analysis_type: Option<Value>,
    #[serde(default, rename = "analysis_type")]
    pub analysis_type_snake: Option<Value>,
}

/// Trimmed, non-blank string content of a field, if any.
fn non_blank_str(primary: Option<Value>, alternate: Option<Value>) -> Option<String> {
    primary
        .filter(|v| !v.is_null())
        .or(alternate)
        .and_then(|v| match v {
            Value::String(s) => Some(s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
}

impl AnalyzeRequest {
    /// Parse a raw JSON body. Anything but a non-empty object is "no data".
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        match &body {
            Value::Object(fields) if !fields.is_empty() => {}
            _ => return Err(AppError::BadRequest(anyhow::anyhow!("No data received"))),
        }

        serde_json::from_value(body)
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e)))
    }

    /// Trim and validate into a submission. Blank or non-string text is
    /// rejected; a blank or non-string type falls back to the default.
    pub fn into_submission(self) -> Result<ContractSubmission, AppError> {
        let contract_text = non_blank_str(self.contract_text, self.contract_text_snake)
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No contract text")))?;

        let analysis_type = non_blank_str(self.analysis_type, self.analysis_type_snake)
            .unwrap_or_else(|| DEFAULT_ANALYSIS_TYPE.to_string());

        Ok(ContractSubmission {
            contract_text,
            analysis_type,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub status: AnalysisStatus,
    pub analysis_type: String,
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub length: usize,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            status: result.status,
            analysis_type: result.analysis_type,
            analysis: result.analysis_text,
            model: result.model,
            length: result.text_length,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider_ready: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ConnectivityResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
