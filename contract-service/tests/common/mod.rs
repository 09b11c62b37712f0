//! Common test utilities for contract-service integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use contract_service::config::{ContractConfig, ProviderConfig, ProviderKind};
use contract_service::services::providers::mock::MockTextProvider;
use contract_service::services::Readiness;
use contract_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use service_core::config::Config as CommonConfig;
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,contract_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Test configuration: random port, mock provider, one-second provider timeout.
pub fn test_config() -> ContractConfig {
    ContractConfig {
        common: CommonConfig { port: 0 },
        service_name: "contract-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        provider: ProviderConfig {
            kind: ProviderKind::Mock,
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        },
    }
}

pub fn ready() -> Readiness {
    Readiness::Ready
}

pub fn degraded() -> Readiness {
    Readiness::Degraded {
        reason: "Provider not configured: Gemini API key not configured".to_string(),
    }
}

/// Router over a shared mock so tests can inspect calls afterwards.
pub fn router_with(provider: &Arc<MockTextProvider>, readiness: Readiness) -> Router {
    init_tracing();
    let state = AppState::new(test_config(), provider.clone(), readiness);
    build_router(state)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request and decode the JSON body.
pub async fn send_json(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "expected JSON body, got {:?}: {}",
            String::from_utf8_lossy(&bytes),
            e
        )
    });
    (status, body)
}
