//! Application startup and lifecycle management.
//!
//! Startup order: build the provider, probe it once, freeze the result into
//! [`AppState`], then bind and serve.

use crate::config::{ContractConfig, ProviderKind};
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::TextProvider;
use crate::services::{probe_provider, Readiness};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, panic::panic_response,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state. Immutable once built.
#[derive(Clone)]
pub struct AppState {
    pub config: ContractConfig,
    pub provider: Arc<dyn TextProvider>,
    pub readiness: Readiness,
}

impl AppState {
    pub fn new(
        config: ContractConfig,
        provider: Arc<dyn TextProvider>,
        readiness: Readiness,
    ) -> Self {
        Self {
            config,
            provider,
            readiness,
        }
    }
}

/// Construct the configured text provider.
pub fn build_provider(config: &ContractConfig) -> Result<Arc<dyn TextProvider>, AppError> {
    match config.provider.kind {
        ProviderKind::Gemini => {
            if config.provider.api_key.is_none() {
                tracing::warn!("GEMINI_API_KEY not set, the startup probe will fail");
            }
            let provider = GeminiTextProvider::new(GeminiConfig {
                api_key: config.provider.api_key.clone(),
                model: config.provider.model.clone(),
                api_base: config.provider.api_base.clone(),
                timeout: config.provider.timeout(),
            })
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

            tracing::info!(model = %config.provider.model, "Initialized Gemini text provider");
            Ok(Arc::new(provider))
        }
        ProviderKind::Mock => {
            tracing::info!("Using mock text provider");
            Ok(Arc::new(MockTextProvider::new(true)))
        }
    }
}

/// Assemble the HTTP router with the service-core middleware stack.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health_check))
        .route("/api/test", get(handlers::connectivity_test))
        .route("/api/analyze", post(handlers::analyze))
        .route("/metrics", get(handlers::metrics_endpoint))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the provider named in the configuration.
    pub async fn build(config: ContractConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already constructed provider.
    ///
    /// Probes the provider once before binding; the outcome is fixed for the
    /// life of the process.
    pub async fn build_with_provider(
        config: ContractConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let readiness = probe_provider(provider.as_ref(), config.provider.timeout()).await;

        // Bind HTTP listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            provider_ready = readiness.is_ready(),
            "Contract service listening"
        );

        Ok(Self {
            port,
            listener,
            state: AppState::new(config, provider, readiness),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the frozen startup state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}
