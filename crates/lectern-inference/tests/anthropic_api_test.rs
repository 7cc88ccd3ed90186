//! Integration tests for the Anthropic backend against a wiremock server.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lectern_inference::{Analysis, AnthropicBackend, DocumentAnalyzer, GenerationBackend};

fn backend_for(server: &MockServer) -> AnthropicBackend {
    AnthropicBackend::with_config(
        server.uri(),
        "test-key".to_string(),
        "claude-test".to_string(),
    )
}

#[tokio::test]
async fn generate_returns_first_text_block() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "generated reply"}],
            "model": "claude-test"
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let reply = backend.generate("prompt").await.unwrap();
    assert_eq!(reply, "generated reply");
}

#[tokio::test]
async fn generate_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.generate("prompt").await.unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn generate_rejects_reply_without_text_block() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": []
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.generate("prompt").await.unwrap_err();
    assert!(err.to_string().contains("no text block"));
}

#[tokio::test]
async fn analyzer_parses_model_json_through_real_backend() {
    let server = MockServer::start().await;
    let analysis_json = json!({
        "summary": "Quantum computing is advancing.",
        "keywords": ["quantum", "computing"],
        "entities": ["IBM"],
        "topic": "Physics"
    });
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": analysis_json.to_string()}]
        })))
        .mount(&server)
        .await;

    let analyzer = DocumentAnalyzer::new(Arc::new(backend_for(&server)));
    let analysis = analyzer.analyze("Quantum computing advances", "notes").await;

    assert_eq!(analysis.topic, "Physics");
    assert_eq!(analysis.keywords, vec!["quantum", "computing"]);
}

#[tokio::test]
async fn analyzer_falls_back_when_api_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let analyzer = DocumentAnalyzer::new(Arc::new(backend_for(&server)));
    let analysis = analyzer.analyze("text", "title").await;

    assert_eq!(analysis, Analysis::unavailable());
    assert_eq!(analysis.summary, "Analysis unavailable");
    assert_eq!(analysis.topic, "General");
    assert!(analysis.keywords.is_empty());
    assert!(analysis.entities.is_empty());
}
