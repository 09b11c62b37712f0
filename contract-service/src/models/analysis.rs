//! Request-scoped analysis entities.

use serde::Serialize;

/// Analysis type applied when the caller does not name one.
pub const DEFAULT_ANALYSIS_TYPE: &str = "Important";

/// A validated analysis request.
///
/// `contract_text` is already trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSubmission {
    pub contract_text: String,
    pub analysis_type: String,
}

impl ContractSubmission {
    /// Character count of the full contract text, before any truncation.
    pub fn text_length(&self) -> usize {
        self.contract_text.chars().count()
    }
}

/// Which path produced the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Fallback,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Success => "success",
            AnalysisStatus::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,
    pub analysis_type: String,
    pub analysis_text: String,
    /// Set only when the provider produced the text.
    pub model: Option<String>,
    pub text_length: usize,
}
