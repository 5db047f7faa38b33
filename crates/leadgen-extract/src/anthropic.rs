//! Anthropic Messages API client, used for Claude pitches.

use leadgen_core::AppConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ProviderError;
use crate::provider::{
    build_http_client, non_blank, parse_body, send, trim_base_url, GenerationBackend,
    GenerationRequest,
};

const PROVIDER: &str = "Claude";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

pub struct AnthropicClient {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::with_base_url(
            &config.anthropic_base_url,
            &config.anthropic_model,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

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
}

fn request_body(model: &str, request: &GenerationRequest) -> Value {
    let mut body = json!({
        "model": model,
        "max_tokens": MAX_TOKENS,
        "messages": [{ "role": "user", "content": request.prompt }],
    });
    if let Some(temperature) = request.temperature {
        body["temperature"] = json!(temperature);
    }
    body
}

fn response_text(response: MessagesResponse) -> Option<String> {
    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();
    non_blank(text)
}

impl GenerationBackend for AnthropicClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<Option<String>, ProviderError> {
        tracing::debug!(model = %self.model, "calling Anthropic messages");
        let builder = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request_body(&self.model, request));
        let body = send(PROVIDER, builder).await?;
        let parsed: MessagesResponse = parse_body("messages", &body)?;
        Ok(response_text(parsed))
    }
}
