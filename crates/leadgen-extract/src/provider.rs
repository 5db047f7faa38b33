//! The generation capability every provider client implements.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use crate::error::ProviderError;

/// Search capabilities a provider may use while generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTool {
    /// Place lookups (Google Maps grounding).
    Maps,
    /// General web search.
    WebSearch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Honored by providers that support grounding; others ignore it.
    pub tools: Vec<SearchTool>,
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            tools: Vec::new(),
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_tools(mut self, tools: &[SearchTool]) -> Self {
        self.tools = tools.to_vec();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A text generation backend.
///
/// `generate` issues exactly one request and returns the textual payload,
/// or `None` when the provider answered without any text.
pub trait GenerationBackend: Send + Sync {
    /// Display name used in logs and credential messages.
    fn provider(&self) -> &'static str;

    fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>> + Send;
}

pub(crate) fn build_http_client(
    timeout_secs: u64,
    user_agent: &str,
) -> Result<Client, ProviderError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Sends the request and returns the body of a 2xx response. Non-2xx
/// responses become [`ProviderError::Api`] carrying the provider's own
/// error message when the body has one.
pub(crate) async fn send(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<String, ProviderError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    tracing::warn!(provider, status = status.as_u16(), "provider returned error status");
    Err(ProviderError::Api {
        provider,
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pulls `error.message` out of a provider error body; falls back to the
/// raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message").or(Some(e)))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(
    context: &str,
    body: &str,
) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// `Some` only for text that is not blank.
pub(crate) fn non_blank(text: String) -> Option<String> {
    (!text.trim().is_empty()).then_some(text)
}
