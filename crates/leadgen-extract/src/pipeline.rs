//! Lead extraction orchestration.

use leadgen_core::{Lead, RawLead, SearchParams};

use crate::error::{classify, ExtractionError};
use crate::normalize::normalize;
use crate::prompt::extraction_prompt;
use crate::provider::{GenerationBackend, GenerationRequest, SearchTool};
use crate::sanitize::sanitize;

pub const DEFAULT_EXTRACTION_TEMPERATURE: f32 = 0.4;

/// Status notifications emitted while an extraction runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Initializing,
    Scanning,
    Processing,
}

impl Progress {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Progress::Initializing => "Initializing AI scraper...",
            Progress::Scanning => "Scanning Maps & Web (this takes 10-20s)...",
            Progress::Processing => "Processing results...",
        }
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Progress sink. Called synchronously; its return value is ignored.
pub type ProgressFn = dyn Fn(Progress) + Send + Sync;

/// Runs one extraction: builds the prompt, makes exactly one generation
/// call with Maps and web search enabled, then sanitizes, parses,
/// normalizes and tags every record in the order the model returned them.
///
/// No retries and no partial results: any failure ends the call.
///
/// # Errors
///
/// - [`ExtractionError::MissingCredential`] if `api_key` is blank. No request
///   is made.
/// - [`ExtractionError::InvalidCredential`], [`ExtractionError::ProviderOverloaded`]
///   or [`ExtractionError::Generic`] when the provider call fails.
/// - [`ExtractionError::EmptyResponse`] if the provider returned no text.
/// - [`ExtractionError::MalformedResponse`] if the text is not a JSON array
///   of objects.
pub async fn extract_leads<B: GenerationBackend>(
    backend: &B,
    api_key: &str,
    params: &SearchParams,
    temperature: f32,
    progress: Option<&ProgressFn>,
) -> Result<Vec<Lead>, ExtractionError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(ExtractionError::MissingCredential {
            provider: backend.provider(),
        });
    }

    let notify = |step: Progress| {
        if let Some(sink) = progress {
            sink(step);
        }
    };

    tracing::info!(
        provider = backend.provider(),
        niche = %params.niche,
        location = %params.location,
        count = params.count,
        "starting lead extraction"
    );
    notify(Progress::Initializing);

    let request = GenerationRequest::new(extraction_prompt(params))
        .with_tools(&[SearchTool::Maps, SearchTool::WebSearch])
        .with_temperature(temperature);

    notify(Progress::Scanning);
    let response = backend.generate(api_key, &request).await;
    notify(Progress::Processing);

    let text = match response {
        Ok(Some(text)) => text,
        Ok(None) => return Err(ExtractionError::EmptyResponse),
        Err(e) => {
            let classified = classify(&e);
            tracing::error!(
                provider = backend.provider(),
                error = %e,
                kind = classified.code(),
                "lead extraction request failed"
            );
            return Err(classified);
        }
    };

    let leads = parse_leads(&text, &params.niche)?;
    tracing::info!(
        requested = params.count,
        returned = leads.len(),
        "lead extraction complete"
    );
    Ok(leads)
}

/// Sanitizes and parses a model response into normalized leads.
///
/// # Errors
///
/// Returns [`ExtractionError::MalformedResponse`] if the sanitized text is
/// not a JSON array of lead objects.
pub fn parse_leads(text: &str, fallback_type: &str) -> Result<Vec<Lead>, ExtractionError> {
    let cleaned = sanitize(text);
    let raw: Vec<RawLead> = match serde_json::from_str(&cleaned) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(error = %e, text = %cleaned, "failed to parse model response as JSON");
            return Err(ExtractionError::MalformedResponse { raw: cleaned });
        }
    };

    Ok(raw
        .into_iter()
        .map(|record| normalize(record, fallback_type))
        .collect())
}

#[cfg(test)]
mod tests {
    use leadgen_core::ServiceId;

    use super::*;

    #[test]
    fn parse_leads_preserves_order_and_duplicates() {
        let text = r#"```json
[{"name":"B","website":"https://b.example","rating":3.1},
 {"name":"A"},
 {"name":"B","website":"https://b.example","rating":3.1}]
```"#;
        let leads = parse_leads(text, "Plumber").unwrap();
        let names: Vec<_> = leads.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "B"]);
        assert_eq!(leads[0].recommended_service, ServiceId::Care);
        assert_eq!(leads[1].recommended_service, ServiceId::Build);
    }

    #[test]
    fn parse_leads_rejects_prose() {
        let err = parse_leads("Sorry, I could not find any businesses.", "x").unwrap_err();
        assert!(
            matches!(err, ExtractionError::MalformedResponse { ref raw } if raw.starts_with("Sorry"))
        );
    }

    #[test]
    fn parse_leads_rejects_non_object_elements() {
        let err = parse_leads("[1, 2, 3]", "x").unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedResponse { .. }));
    }

    #[test]
    fn empty_array_is_an_empty_result() {
        assert!(parse_leads("[]", "x").unwrap().is_empty());
    }

    #[test]
    fn progress_messages_match_steps() {
        assert_eq!(Progress::Initializing.to_string(), "Initializing AI scraper...");
        assert_eq!(
            Progress::Scanning.message(),
            "Scanning Maps & Web (this takes 10-20s)..."
        );
        assert_eq!(Progress::Processing.message(), "Processing results...");
    }
}
