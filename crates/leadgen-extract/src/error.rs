use thiserror::Error;

/// Transport-level failures from a generation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProviderError {
    /// HTTP status reported by the provider, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Http(e) => e.status().map(|s| s.as_u16()),
            ProviderError::Api { status, .. } => Some(*status),
            ProviderError::Deserialize { .. } => None,
        }
    }
}

const GENERIC_FALLBACK: &str = "Failed to fetch leads. Please check your network and API key.";

fn generic_message(message: &str) -> &str {
    if message.trim().is_empty() {
        GENERIC_FALLBACK
    } else {
        message
    }
}

/// Caller-facing failure of an extraction or pitch call. Messages are
/// display-ready.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{provider} API Key is missing. Please configure it in Settings.")]
    MissingCredential { provider: &'static str },

    #[error("Invalid API Key. Please check your settings.")]
    InvalidCredential,

    #[error("No data received. The AI model might be busy, please try again.")]
    EmptyResponse,

    /// `raw` keeps the unparseable text for diagnostics; it is not part of the
    /// message.
    #[error("AI returned invalid data structure. Please try again.")]
    MalformedResponse { raw: String },

    #[error(
        "The AI provider is temporarily overloaded. Please try searching for a smaller count (e.g., 10) or try again in a moment."
    )]
    ProviderOverloaded,

    #[error("{}", generic_message(.0))]
    Generic(String),
}

impl ExtractionError {
    /// Stable machine-readable code for API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionError::MissingCredential { .. } => "missing_credential",
            ExtractionError::InvalidCredential => "invalid_credential",
            ExtractionError::EmptyResponse => "empty_response",
            ExtractionError::MalformedResponse { .. } => "malformed_response",
            ExtractionError::ProviderOverloaded => "provider_overloaded",
            ExtractionError::Generic(_) => "provider_error",
        }
    }
}

const CREDENTIAL_PHRASES: [&str; 5] = [
    "api key",
    "api_key",
    "permission_denied",
    "unauthenticated",
    "authentication",
];

const OVERLOAD_PHRASES: [&str; 4] = ["internal", "overloaded", "unavailable", "high demand"];

/// Maps a transport failure onto the caller-facing taxonomy.
///
/// Credential problems are checked first, then upstream overload; anything
/// else is generic and keeps the transport message.
#[must_use]
pub fn classify(error: &ProviderError) -> ExtractionError {
    let message = error.to_string();
    let lowered = message.to_lowercase();
    let status = error.status();

    if matches!(status, Some(401 | 403)) || CREDENTIAL_PHRASES.iter().any(|p| lowered.contains(p))
    {
        return ExtractionError::InvalidCredential;
    }

    if matches!(status, Some(500 | 502 | 503 | 504 | 529))
        || OVERLOAD_PHRASES.iter().any(|p| lowered.contains(p))
    {
        return ExtractionError::ProviderOverloaded;
    }

    ExtractionError::Generic(message)
}
