//! Configuration module for contract-service.

use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Public Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text model used when `GEMINI_MODEL` is unset.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Upper bound on a single provider round-trip.
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ContractConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Absent key is not an error: the service starts in fallback mode.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

/// Which text provider backs the analysis endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    /// Offline canned responses, for local development.
    Mock,
}

impl std::str::FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "ANALYSIS_PROVIDER must be 'gemini' or 'mock', got '{}'",
                other
            ))),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ContractConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "contract-service".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: non_empty_env("OTLP_ENDPOINT"),
            provider: ProviderConfig {
                kind: env::var("ANALYSIS_PROVIDER")
                    .ok()
                    .map(|s| s.parse())
                    .transpose()?
                    .unwrap_or(ProviderKind::Gemini),
                api_key: non_empty_env("GEMINI_API_KEY").map(Secret::new),
                model: non_empty_env("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: non_empty_env("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
            },
        })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
