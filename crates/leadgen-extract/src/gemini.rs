//! Client for the Gemini `generateContent` REST endpoint.
//!
//! Extraction runs through this client with Maps and Search grounding
//! enabled; pitch generation uses it without tools.

use leadgen_core::AppConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ProviderError;
use crate::provider::{
    build_http_client, non_blank, parse_body, send, trim_base_url, GenerationBackend,
    GenerationRequest, SearchTool,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const PROVIDER: &str = "Gemini";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::with_base_url(
            &config.gemini_base_url,
            &config.gemini_model,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        base_url: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            base_url: trim_base_url(base_url),
            model: model.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

fn request_body(request: &GenerationRequest) -> Value {
    let mut body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
    });

    if !request.tools.is_empty() {
        let tools: Vec<Value> = request
            .tools
            .iter()
            .map(|tool| match tool {
                SearchTool::Maps => json!({ "googleMaps": {} }),
                SearchTool::WebSearch => json!({ "googleSearch": {} }),
            })
            .collect();
        body["tools"] = Value::Array(tools);
    }
    if let Some(temperature) = request.temperature {
        body["generationConfig"] = json!({ "temperature": temperature });
    }
    body
}

/// Concatenated text parts of the first candidate.
fn response_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    non_blank(text)
}

impl GenerationBackend for GeminiClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<Option<String>, ProviderError> {
        tracing::debug!(model = %self.model, tools = request.tools.len(), "calling Gemini");
        let builder = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body(request));
        let body = send(PROVIDER, builder).await?;
        let parsed: GenerateContentResponse = parse_body("generateContent", &body)?;
        Ok(response_text(parsed))
    }
}
