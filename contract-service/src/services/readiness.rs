//! One-shot provider availability probe.
//!
//! The result is computed before the listener accepts traffic and never
//! changes for the life of the process.

use crate::services::providers::{generate_with_timeout, TextProvider};
use std::time::Duration;

/// Prompt sent once at startup; any non-empty answer counts as success.
pub const PROBE_PROMPT: &str = "Say 'OK' if working";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// Provider unreachable at startup; analyses use the fallback composer.
    Degraded { reason: String },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Issue a single probe request. Never fails: every problem becomes `Degraded`.
pub async fn probe_provider(provider: &dyn TextProvider, timeout: Duration) -> Readiness {
    match generate_with_timeout(provider, PROBE_PROMPT, timeout).await {
        Ok(response) if !response.text.trim().is_empty() => {
            tracing::info!(
                provider = provider.name(),
                model = provider.model(),
                reply = %response.text.trim(),
                "Text provider initialized successfully"
            );
            Readiness::Ready
        }
        Ok(_) => {
            let reason = "probe returned empty text".to_string();
            tracing::warn!(
                provider = provider.name(),
                model = provider.model(),
                %reason,
                "Text provider unavailable, using fallback mode"
            );
            Readiness::Degraded { reason }
        }
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                model = provider.model(),
                error = %e,
                "Text provider unavailable, using fallback mode"
            );
            Readiness::Degraded {
                reason: e.to_string(),
            }
        }
    }
}
