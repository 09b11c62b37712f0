//! Canned advisory text used when no provider is available.

/// Marks every fallback response as simulated.
pub const FALLBACK_DISCLAIMER: &str = "NOTE: This is a simulated response. For real AI \
analysis, ensure the Gemini API key is configured.";

/// Build the fallback analysis. Pure and infallible.
pub fn compose_fallback(analysis_type: &str, contract_text: &str) -> String {
    format!(
        "AI provider not available - using fallback analysis\n\
         \n\
         Analysis Type: {analysis_type}\n\
         Contract Length: {length} characters\n\
         \n\
         RECOMMENDED CHECKS:\n\
         - Review payment terms and amounts\n\
         - Check termination and renewal clauses\n\
         - Verify liability and warranty sections\n\
         - Examine confidentiality requirements\n\
         - Confirm dispute resolution process\n\
         \n\
         {disclaimer}\n",
        analysis_type = analysis_type,
        length = contract_text.chars().count(),
        disclaimer = FALLBACK_DISCLAIMER,
    )
}
