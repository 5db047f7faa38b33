//! Outreach pitch generation across the configured providers.

use leadgen_core::{AppConfig, AppSettings, Lead, PitchModel, ServiceCatalog, ServiceId, ServiceOffer};
use serde::Serialize;

use crate::anthropic::AnthropicClient;
use crate::error::{classify, ExtractionError, ProviderError};
use crate::gemini::GeminiClient;
use crate::openai::ChatCompletionsClient;
use crate::prompt::pitch_prompt;
use crate::provider::{GenerationBackend, GenerationRequest};

pub const DEFAULT_PITCH_TEMPERATURE: f32 = 0.7;

/// A generated pitch and what produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pitch {
    pub service_id: ServiceId,
    pub provider: PitchModel,
    pub pitch: String,
}

/// The provider a pitch will be sent to and the key to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchRoute<'a> {
    pub model: PitchModel,
    pub api_key: &'a str,
}

/// Picks the pitch provider: the selected model when its key is set, else
/// Gemini when a Gemini key is set.
///
/// # Errors
///
/// Returns [`ExtractionError::MissingCredential`] naming the selected
/// provider when neither key is available.
pub fn resolve_pitch_route(settings: &AppSettings) -> Result<PitchRoute<'_>, ExtractionError> {
    let selected = settings.pitch_model;
    if let Some(api_key) = settings.key_for(selected) {
        return Ok(PitchRoute {
            model: selected,
            api_key,
        });
    }

    if let Some(api_key) = settings.key_for(PitchModel::Gemini) {
        tracing::warn!(
            selected = %selected,
            "no key for selected pitch model; falling back to Gemini"
        );
        return Ok(PitchRoute {
            model: PitchModel::Gemini,
            api_key,
        });
    }

    Err(ExtractionError::MissingCredential {
        provider: selected.display_name(),
    })
}

/// The service to pitch: the requested one, else the lead's recommendation.
#[must_use]
pub fn pitch_service<'a>(
    catalog: &'a ServiceCatalog,
    lead: &Lead,
    requested: Option<ServiceId>,
) -> Option<&'a ServiceOffer> {
    catalog.find(requested.unwrap_or(lead.recommended_service))
}

/// One client per pitch provider.
pub struct PitchClients {
    pub gemini: GeminiClient,
    pub openai: ChatCompletionsClient,
    pub grok: ChatCompletionsClient,
    pub claude: AnthropicClient,
    pub temperature: f32,
}

impl PitchClients {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if any HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            gemini: GeminiClient::from_config(config)?,
            openai: ChatCompletionsClient::openai(config)?,
            grok: ChatCompletionsClient::grok(config)?,
            claude: AnthropicClient::from_config(config)?,
            temperature: config.pitch_temperature,
        })
    }

    /// Generates one pitch. Exactly one provider request, no retries.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::MissingCredential`] when no usable key is
    /// configured, [`ExtractionError::EmptyResponse`] when the provider
    /// returns no text, or a classified provider failure.
    pub async fn generate_pitch(
        &self,
        settings: &AppSettings,
        service: &ServiceOffer,
        lead: &Lead,
    ) -> Result<Pitch, ExtractionError> {
        let route = resolve_pitch_route(settings)?;
        let request =
            GenerationRequest::new(pitch_prompt(service, lead)).with_temperature(self.temperature);

        tracing::info!(
            provider = %route.model,
            service = %service.id,
            lead = %lead.name,
            "generating pitch"
        );

        let text = match route.model {
            PitchModel::Gemini => run(&self.gemini, route.api_key, &request).await?,
            PitchModel::OpenAi => run(&self.openai, route.api_key, &request).await?,
            PitchModel::Grok => run(&self.grok, route.api_key, &request).await?,
            PitchModel::Claude => run(&self.claude, route.api_key, &request).await?,
        };

        Ok(Pitch {
            service_id: service.id,
            provider: route.model,
            pitch: text.trim().to_string(),
        })
    }
}

async fn run<B: GenerationBackend>(
    backend: &B,
    api_key: &str,
    request: &GenerationRequest,
) -> Result<String, ExtractionError> {
    match backend.generate(api_key, request).await {
        Ok(Some(text)) => Ok(text),
        Ok(None) => Err(ExtractionError::EmptyResponse),
        Err(e) => {
            let classified = classify(&e);
            tracing::error!(
                provider = backend.provider(),
                error = %e,
                kind = classified.code(),
                "pitch request failed"
            );
            Err(classified)
        }
    }
}
