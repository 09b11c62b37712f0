//! Contract analysis: prompt construction and provider/fallback dispatch.

use crate::models::{AnalysisResult, AnalysisStatus, ContractSubmission};
use crate::services::fallback::compose_fallback;
use crate::services::providers::{generate_with_timeout, ProviderError};
use crate::startup::AppState;

/// Longest contract prefix, in characters, that is ever sent to the provider.
pub const MAX_CONTRACT_CHARS: usize = 3000;

/// Return the first `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Build the provider prompt. The contract text must already be truncated.
pub fn build_prompt(contract_text: &str, analysis_type: &str) -> String {
    format!(
        "Analyze this contract as a legal expert:\n\
         \n\
         CONTRACT TEXT:\n\
         {contract_text}\n\
         \n\
         ANALYSIS TYPE: {analysis_type}\n\
         \n\
         Provide:\n\
         1. Key issues found\n\
         2. Risks identified\n\
         3. Recommendations\n\
         4. Action items\n\
         \n\
         Use bullet points and be concise.\n"
    )
}

/// Analyze a submission using the provider when ready, the fallback otherwise.
///
/// A provider failure is returned as-is; there is no mid-request fallback.
pub async fn analyze_contract(
    state: &AppState,
    submission: &ContractSubmission,
) -> Result<AnalysisResult, ProviderError> {
    let text_length = submission.text_length();

    if !state.readiness.is_ready() {
        return Ok(AnalysisResult {
            status: AnalysisStatus::Fallback,
            analysis_type: submission.analysis_type.clone(),
            analysis_text: compose_fallback(&submission.analysis_type, &submission.contract_text),
            model: None,
            text_length,
        });
    }

    let excerpt = truncate_chars(&submission.contract_text, MAX_CONTRACT_CHARS);
    let prompt = build_prompt(excerpt, &submission.analysis_type);

    let response = generate_with_timeout(
        state.provider.as_ref(),
        &prompt,
        state.config.provider.timeout(),
    )
    .await?;

    if response.is_truncated() {
        tracing::warn!(
            model = state.provider.model(),
            output_tokens = response.output_tokens,
            "Provider reply truncated at the output token limit"
        );
    }

    Ok(AnalysisResult {
        status: AnalysisStatus::Success,
        analysis_type: submission.analysis_type.clone(),
        analysis_text: response.text,
        model: Some(state.provider.model().to_string()),
        text_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text_intact() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn truncate_counts_characters() {
        let text = "éééé";
        assert_eq!(truncate_chars(text, 2), "éé");
    }

    #[test]
    fn truncate_at_limit_drops_the_tail() {
        let text = format!("{}{}", "a".repeat(MAX_CONTRACT_CHARS), "§tail");
        let excerpt = truncate_chars(&text, MAX_CONTRACT_CHARS);

        assert_eq!(excerpt.chars().count(), MAX_CONTRACT_CHARS);
        assert!(!excerpt.contains('§'));
    }

    #[test]
    fn prompt_embeds_text_type_and_instructions() {
        let prompt = build_prompt("The tenant shall pay rent.", "Risk");

        assert!(prompt.contains("CONTRACT TEXT:\nThe tenant shall pay rent.\n"));
        assert!(prompt.contains("ANALYSIS TYPE: Risk"));
        for item in [
            "Key issues found",
            "Risks identified",
            "Recommendations",
            "Action items",
            "bullet points",
        ] {
            assert!(prompt.contains(item), "missing {item}");
        }
    }
}
