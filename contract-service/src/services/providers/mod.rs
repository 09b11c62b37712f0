//! Text provider abstraction and implementations.
//!
//! The analysis endpoint only needs "prompt in, text out"; everything
//! provider-specific lives behind [`TextProvider`] so Gemini and the mock are
//! interchangeable.

pub mod gemini;
pub mod mock;

use crate::services::metrics;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::InvalidResponse(_) => "invalid_response",
            ProviderError::Timeout(_) => "timeout",
        }
    }
}

/// Result of a provider response.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text. May be empty; emptiness is not a failure.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

impl ProviderResponse {
    /// True when the reply was cut off at the output token limit.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason == FinishReason::Length
    }
}

/// Reason why generation stopped. Filtered replies are errors, not reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Model identifier reported to callers.
    fn model(&self) -> &str;

    /// Generate a text response for a single prompt. No retries.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;
}

/// Run one generation bounded by `limit`.
///
/// On expiry the in-flight request future is dropped, which cancels it.
pub async fn generate_with_timeout(
    provider: &dyn TextProvider,
    prompt: &str,
    limit: Duration,
) -> Result<ProviderResponse, ProviderError> {
    let start = Instant::now();

    let result = match tokio::time::timeout(limit, provider.generate(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(limit)),
    };

    metrics::record_provider_latency(
        provider.name(),
        provider.model(),
        start.elapsed().as_secs_f64(),
    );

    match &result {
        Ok(response) => {
            metrics::record_tokens(
                provider.model(),
                response.input_tokens,
                response.output_tokens,
            );
        }
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                model = provider.model(),
                error = %e,
                "Provider call failed"
            );
            metrics::record_provider_error(provider.name(), e.kind());
        }
    }

    result
}
