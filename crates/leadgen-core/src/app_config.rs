use std::net::SocketAddr;
use std::path::PathBuf;

use crate::settings::{AppSettings, PitchModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory backing the file store for settings and history.
    pub data_dir: PathBuf,
    /// Optional YAML override for the built-in service catalog.
    pub services_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub history_limit: usize,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub grok_base_url: String,
    pub grok_model: String,
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    pub extraction_temperature: f32,
    pub pitch_temperature: f32,
    pub pitch_model: PitchModel,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub grok_api_key: Option<String>,
}

impl AppConfig {
    /// Settings seeded from environment keys, used when nothing has been
    /// persisted yet.
    #[must_use]
    pub fn default_settings(&self) -> AppSettings {
        AppSettings {
            gemini_key: self.gemini_api_key.clone().unwrap_or_default(),
            openai_key: self.openai_api_key.clone().unwrap_or_default(),
            claude_key: self.anthropic_api_key.clone().unwrap_or_default(),
            grok_key: self.grok_api_key.clone().unwrap_or_default(),
            pitch_model: self.pitch_model,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("services_path", &self.services_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("history_limit", &self.history_limit)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("grok_base_url", &self.grok_base_url)
            .field("grok_model", &self.grok_model)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("anthropic_model", &self.anthropic_model)
            .field("extraction_temperature", &self.extraction_temperature)
            .field("pitch_temperature", &self.pitch_temperature)
            .field("pitch_model", &self.pitch_model)
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("grok_api_key", &redact(&self.grok_api_key))
            .finish()
    }
}
