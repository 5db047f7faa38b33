//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use leadgen_extract::{GeminiClient, GenerationBackend, GenerationRequest, ProviderError, SearchTool};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url(base_url, "gemini-2.5-flash", 30, "leadgen-test")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn generate_sends_key_and_tools_and_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "tools": [{ "googleMaps": {} }, { "googleSearch": {} }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "[]" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = GenerationRequest::new("find plumbers")
        .with_tools(&[SearchTool::Maps, SearchTool::WebSearch]);
    let text = test_client(&server.uri())
        .generate("test-key", &request)
        .await
        .expect("should return text");

    assert_eq!(text.as_deref(), Some("[]"));
}

#[tokio::test]
async fn generate_returns_none_when_candidate_has_no_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })))
        .mount(&server)
        .await;

    let text = test_client(&server.uri())
        .generate("k", &GenerationRequest::new("p"))
        .await
        .expect("empty candidates are not an error");

    assert!(text.is_none());
}

#[tokio::test]
async fn generate_surfaces_provider_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate("bad", &GenerationRequest::new("p"))
        .await
        .unwrap_err();

    match err {
        ProviderError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert!(message.starts_with("API key not valid"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_reports_unparseable_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate("k", &GenerationRequest::new("p"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Deserialize { .. }));
}
