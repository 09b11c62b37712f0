//! Prometheus metrics for contract-service.
//!
//! HTTP request metrics flow through the `metrics` facade into the installed
//! Prometheus recorder; analysis and provider metrics live in a dedicated
//! `prometheus` registry. Both are rendered together on `/metrics`.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static ANALYSIS_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup; later calls are no-ops.
pub fn init_metrics() -> anyhow::Result<()> {
    if REGISTRY.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = METRICS_HANDLE.set(handle);

    let registry = Registry::new();

    let analysis_requests = IntCounterVec::new(
        Opts::new(
            "contract_analysis_requests_total",
            "Contract analyses by outcome",
        ),
        &["status"], // success, fallback, error
    )?;

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "provider_latency_seconds",
            "Text provider round-trip latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]),
        &["provider", "model"],
    )?;

    let provider_errors = IntCounterVec::new(
        Opts::new("provider_errors_total", "Total text provider errors"),
        &["provider", "error_type"],
    )?;

    let provider_tokens = IntCounterVec::new(
        Opts::new("provider_tokens_total", "Tokens processed by the provider"),
        &["model", "type"], // type: input, output
    )?;

    registry.register(Box::new(analysis_requests.clone()))?;
    registry.register(Box::new(provider_latency.clone()))?;
    registry.register(Box::new(provider_errors.clone()))?;
    registry.register(Box::new(provider_tokens.clone()))?;

    let _ = ANALYSIS_REQUESTS_TOTAL.set(analysis_requests);
    let _ = PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = PROVIDER_ERRORS_TOTAL.set(provider_errors);
    let _ = PROVIDER_TOKENS_TOTAL.set(provider_tokens);
    let _ = REGISTRY.set(registry);

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    let Some(registry) = REGISTRY.get() else {
        return output;
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        output.push_str(&format!("# Failed to encode metrics: {}\n", e));
        return output;
    }

    match String::from_utf8(buffer) {
        Ok(s) => output.push_str(&s),
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
        }
    }

    output
}

/// Record the outcome of one analysis request.
pub fn record_analysis(status: &str) {
    if let Some(counter) = ANALYSIS_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[status]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}

/// Record token usage reported by the provider.
pub fn record_tokens(model: &str, input_tokens: i32, output_tokens: i32) {
    if let Some(counter) = PROVIDER_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[model, "input"])
            .inc_by(input_tokens.max(0) as u64);
        counter
            .with_label_values(&[model, "output"])
            .inc_by(output_tokens.max(0) as u64);
    }
}
