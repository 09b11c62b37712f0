mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{degraded, post_json, ready, router_with, send_json};
use contract_service::services::analysis::MAX_CONTRACT_CHARS;
use contract_service::services::fallback::FALLBACK_DISCLAIMER;
use contract_service::services::providers::mock::{MockTextProvider, MOCK_MODEL};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn degraded_service_returns_fallback_scenario() {
    let provider = Arc::new(MockTextProvider::new(true));
    let router = router_with(&provider, degraded());

    let (status, body) = send_json(
        router,
        post_json(
            "/api/analyze",
            r#"{"contractText":"Sample clause text.","analysisType":"Risk"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "fallback");
    assert_eq!(body["analysisType"], "Risk");
    assert_eq!(body["length"], 19);
    assert!(body["analysis"].as_str().unwrap().contains(FALLBACK_DISCLAIMER));
    assert!(body.get("model").is_none());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn degraded_service_never_calls_provider_even_for_long_text() {
    let provider = Arc::new(MockTextProvider::new(true));
    let text = "x".repeat(MAX_CONTRACT_CHARS * 2);

    let (status, body) = send_json(
        router_with(&provider, degraded()),
        post_json("/api/analyze", &json!({ "contractText": text }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "fallback");
    assert_eq!(body["analysisType"], "Important");
    assert_eq!(body["length"], MAX_CONTRACT_CHARS * 2);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn ready_service_relays_provider_text_verbatim() {
    let reply = "- Issue: no termination clause\n- Risk: unlimited liability";
    let provider = Arc::new(MockTextProvider::new(true).with_response(reply));

    let (status, body) = send_json(
        router_with(&provider, ready()),
        post_json(
            "/api/analyze",
            r#"{"contract_text":"The supplier may terminate at will.","analysis_type":"Risk"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["analysis"], reply);
    assert_eq!(body["model"], MOCK_MODEL);
    assert_eq!(body["analysisType"], "Risk");
    assert_eq!(body["length"], "The supplier may terminate at will.".len());
    assert_eq!(provider.call_count(), 1);

    let prompt = &provider.prompts()[0];
    assert!(prompt.contains("The supplier may terminate at will."));
    assert!(prompt.contains("ANALYSIS TYPE: Risk"));
}

#[tokio::test]
async fn oversized_text_forwards_exact_prefix_and_reports_full_length() {
    let provider = Arc::new(MockTextProvider::new(true).with_response("ok"));
    let prefix = "a".repeat(MAX_CONTRACT_CHARS);
    let text = format!("{}§{}", prefix, "b".repeat(500));

    let (status, body) = send_json(
        router_with(&provider, ready()),
        post_json("/api/analyze", &json!({ "contractText": text }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["length"], MAX_CONTRACT_CHARS + 501);

    let prompt = &provider.prompts()[0];
    assert!(prompt.contains(&format!("CONTRACT TEXT:\n{}\n", prefix)));
    assert!(!prompt.contains('§'));
    assert!(!prompt.contains('b'.to_string().repeat(2).as_str()));
}

#[tokio::test]
async fn length_counts_trimmed_characters() {
    let provider = Arc::new(MockTextProvider::new(true));

    let (_, body) = send_json(
        router_with(&provider, degraded()),
        post_json("/api/analyze", r#"{"contractText":"   Prix: 10 €   "}"#),
    )
    .await;

    assert_eq!(body["length"], 10);
}

#[tokio::test]
async fn blank_contract_text_is_rejected_without_provider_call() {
    for readiness in [ready(), degraded()] {
        for text in ["", "   "] {
            let provider = Arc::new(MockTextProvider::new(true));

            let (status, body) = send_json(
                router_with(&provider, readiness.clone()),
                post_json("/api/analyze", &json!({ "contractText": text }).to_string()),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "No contract text");
            assert_eq!(provider.call_count(), 0);
        }
    }
}

#[tokio::test]
async fn non_string_contract_text_is_rejected_without_provider_call() {
    for raw in [r#"{"contractText":42}"#, r#"{"contractText":{}}"#] {
        let provider = Arc::new(MockTextProvider::new(true));

        let (status, body) = send_json(
            router_with(&provider, ready()),
            post_json("/api/analyze", raw),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw}");
        assert_eq!(body["error"], "No contract text", "body {raw}");
        assert_eq!(provider.call_count(), 0);
    }
}

#[tokio::test]
async fn both_field_spellings_prefer_camel_case() {
    let provider = Arc::new(MockTextProvider::new(true));

    let (status, body) = send_json(
        router_with(&provider, degraded()),
        post_json(
            "/api/analyze",
            r#"{"contractText":"Sample clause text.","contract_text":"ignored","analysisType":7}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["length"], 19);
    assert_eq!(body["analysisType"], "Important");
}

#[tokio::test]
async fn missing_body_is_no_data() {
    let provider = Arc::new(MockTextProvider::new(true));
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_json(router_with(&provider, ready()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data received");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn non_object_and_malformed_bodies_are_no_data() {
    for raw in ["[1,2,3]", "\"contract\"", "null", "{}", "{not json"] {
        let provider = Arc::new(MockTextProvider::new(true));

        let (status, body) = send_json(
            router_with(&provider, ready()),
            post_json("/api/analyze", raw),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw}");
        assert_eq!(body["error"], "No data received", "body {raw}");
        assert_eq!(provider.call_count(), 0);
    }
}

#[tokio::test]
async fn provider_failure_on_ready_service_is_server_error() {
    let provider = Arc::new(MockTextProvider::new(false));

    let (status, body) = send_json(
        router_with(&provider, ready()),
        post_json("/api/analyze", r#"{"contractText":"Clause 1."}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("not enabled"));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn hanging_provider_times_out_as_server_error() {
    let provider = Arc::new(MockTextProvider::new(true).with_delay(Duration::from_secs(30)));

    let (status, body) = send_json(
        router_with(&provider, ready()),
        post_json("/api/analyze", r#"{"contractText":"Clause 1."}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("did not respond"));
}
