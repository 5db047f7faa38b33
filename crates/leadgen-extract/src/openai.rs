//! OpenAI-compatible `/chat/completions` client. Serves both OpenAI and xAI
//! Grok, which share the wire format.

use leadgen_core::AppConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ProviderError;
use crate::provider::{
    build_http_client, non_blank, parse_body, send, trim_base_url, GenerationBackend,
    GenerationRequest,
};

pub struct ChatCompletionsClient {
    client: Client,
    provider: &'static str,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

impl ChatCompletionsClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn openai(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::with_base_url(
            "OpenAI",
            &config.openai_base_url,
            &config.openai_model,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn grok(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::with_base_url(
            "Grok",
            &config.grok_base_url,
            &config.grok_model,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        provider: &'static str,
        base_url: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            provider,
            base_url: trim_base_url(base_url),
            model: model.to_string(),
        })
    }
}

fn request_body(model: &str, request: &GenerationRequest) -> Value {
    let mut body = json!({
        "model": model,
        "messages": [{ "role": "user", "content": request.prompt }],
    });
    if let Some(temperature) = request.temperature {
        body["temperature"] = json!(temperature);
    }
    body
}

/// Content of the first choice, if it carries non-blank text.
fn response_text(response: ChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()?
        .message?
        .content
        .and_then(non_blank)
}

impl GenerationBackend for ChatCompletionsClient {
    fn provider(&self) -> &'static str {
        self.provider
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<Option<String>, ProviderError> {
        tracing::debug!(provider = self.provider, model = %self.model, "calling chat completions");
        let builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body(&self.model, request));
        let body = send(self.provider, builder).await?;
        let parsed: ChatResponse = parse_body("chat/completions", &body)?;
        Ok(response_text(parsed))
    }
}
