//! Gemini client against a mock HTTP server

use super::test_utils::{survey, valid_plan_json};
use homeplan::breaker::BreakerState;
use homeplan::error::PlanError;
use homeplan::orchestrator::PlanOrchestrator;
use homeplan::plan::PlanSource;
use homeplan::provider::{GeminiClient, ProviderConfig, TextGenerationClient};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn create_test_client(mock_server: &MockServer) -> GeminiClient {
    let config = ProviderConfig {
        url: format!("{}{}", mock_server.uri(), MODEL_PATH),
        api_key: Some("mock_api_key_for_testing".to_string()),
        timeout_secs: 1,
        connect_timeout_secs: 1,
    };
    GeminiClient::new(&config).expect("Failed to build Gemini client")
}

fn candidate(text: &str) -> serde_json::Value {
    json!({"candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]})
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "mock_api_key_for_testing"))
        .and(body_partial_json(
            json!({"contents": [{"parts": [{"text": "hello"}]}]}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("hi there")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert_eq!(client.generate("hello").await.unwrap(), "hi there");
    assert_eq!(client.provider_name(), "gemini");
}

#[tokio::test]
async fn test_rate_limit_and_overload_are_unavailable() {
    for status in [429u16, 503] {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("try later"))
            .mount(&mock_server)
            .await;

        let err = create_test_client(&mock_server)
            .generate("hello")
            .await
            .unwrap_err();
        assert!(
            matches!(err, PlanError::TransportUnavailable(_)),
            "status {} gave {:?}",
            status,
            err
        );
        assert!(err.is_retryable());
    }
}

#[tokio::test]
async fn test_other_statuses_are_fatal_transport_errors() {
    for status in [400u16, 401, 500] {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .mount(&mock_server)
            .await;

        let err = create_test_client(&mock_server)
            .generate("hello")
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::TransportError(_)));
        assert!(err.to_string().contains(&status.to_string()));
    }
}

#[tokio::test]
async fn test_slow_response_is_a_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate("late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let err = create_test_client(&mock_server)
        .generate("hello")
        .await
        .unwrap_err();
    assert!(matches!(err, PlanError::TransportTimeout(_)), "{:?}", err);
}

#[tokio::test]
async fn test_missing_candidates_is_a_transport_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"promptFeedback": {}})))
        .mount(&mock_server)
        .await;

    let err = create_test_client(&mock_server)
        .generate("hello")
        .await
        .unwrap_err();
    assert!(matches!(err, PlanError::TransportError(_)));
    assert!(err.to_string().contains("invalid response"));
}

#[tokio::test]
async fn test_orchestrated_provider_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(&valid_plan_json())))
        .mount(&mock_server)
        .await;

    let orchestrator =
        PlanOrchestrator::builder(Arc::new(create_test_client(&mock_server))).build();
    let response = orchestrator.generate(survey()).await.unwrap();
    assert_eq!(response.source, PlanSource::Provider);
    assert!(response.plan.has_report());
}

#[tokio::test]
async fn test_orchestrated_overload_opens_breaker() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let orchestrator =
        PlanOrchestrator::builder(Arc::new(create_test_client(&mock_server))).build();
    for _ in 0..4 {
        let response = orchestrator.generate(survey()).await.unwrap();
        assert_eq!(response.source, PlanSource::Fallback);
    }
    assert_eq!(orchestrator.breaker_snapshot().state, BreakerState::Open);
}
