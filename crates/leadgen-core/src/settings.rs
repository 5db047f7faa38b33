//! User settings: provider API keys and the preferred pitch model.

use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;
use crate::{CoreError, StoreError};

/// Store key the settings are persisted under.
pub const SETTINGS_KEY: &str = "leadgen_settings";

/// Provider used to write outreach pitches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchModel {
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    Claude,
    Grok,
}

impl PitchModel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PitchModel::Gemini => "gemini",
            PitchModel::OpenAi => "openai",
            PitchModel::Claude => "claude",
            PitchModel::Grok => "grok",
        }
    }

    /// Human-facing provider name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            PitchModel::Gemini => "Gemini",
            PitchModel::OpenAi => "OpenAI",
            PitchModel::Claude => "Claude",
            PitchModel::Grok => "Grok",
        }
    }
}

impl std::fmt::Display for PitchModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for PitchModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(PitchModel::Gemini),
            "openai" => Ok(PitchModel::OpenAi),
            "claude" => Ok(PitchModel::Claude),
            "grok" => Ok(PitchModel::Grok),
            _ => Err(CoreError::UnknownPitchModel(s.to_string())),
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub gemini_key: String,
    pub openai_key: String,
    pub claude_key: String,
    pub grok_key: String,
    pub pitch_model: PitchModel,
}

/// A partial settings change. `None` leaves the field untouched; an empty
/// string clears a key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub gemini_key: Option<String>,
    pub openai_key: Option<String>,
    pub claude_key: Option<String>,
    pub grok_key: Option<String>,
    pub pitch_model: Option<PitchModel>,
}

/// Which keys are configured, without revealing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyPresence {
    pub gemini: bool,
    pub openai: bool,
    pub claude: bool,
    pub grok: bool,
}

impl AppSettings {
    /// The key configured for `model`, if non-blank.
    #[must_use]
    pub fn key_for(&self, model: PitchModel) -> Option<&str> {
        let key = match model {
            PitchModel::Gemini => &self.gemini_key,
            PitchModel::OpenAi => &self.openai_key,
            PitchModel::Claude => &self.claude_key,
            PitchModel::Grok => &self.grok_key,
        };
        let key = key.trim();
        (!key.is_empty()).then_some(key)
    }

    #[must_use]
    pub fn key_presence(&self) -> KeyPresence {
        KeyPresence {
            gemini: self.key_for(PitchModel::Gemini).is_some(),
            openai: self.key_for(PitchModel::OpenAi).is_some(),
            claude: self.key_for(PitchModel::Claude).is_some(),
            grok: self.key_for(PitchModel::Grok).is_some(),
        }
    }

    pub fn apply(&mut self, update: SettingsUpdate) {
        let assign = |slot: &mut String, value: Option<String>| {
            if let Some(v) = value {
                *slot = v.trim().to_string();
            }
        };
        assign(&mut self.gemini_key, update.gemini_key);
        assign(&mut self.openai_key, update.openai_key);
        assign(&mut self.claude_key, update.claude_key);
        assign(&mut self.grok_key, update.grok_key);
        if let Some(model) = update.pitch_model {
            self.pitch_model = model;
        }
    }

    /// Loads persisted settings, or `fallback` when none are stored or the
    /// stored value cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store itself fails.
    pub fn load(store: &dyn KeyValueStore, fallback: AppSettings) -> Result<Self, StoreError> {
        let Some(raw) = store.get(SETTINGS_KEY)? else {
            return Ok(fallback);
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse stored settings; using defaults");
                Ok(fallback)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the store write fails.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        let raw = serde_json::to_string(self).map_err(|e| StoreError::Serialize {
            key: SETTINGS_KEY.to_string(),
            source: e,
        })?;
        store.set(SETTINGS_KEY, &raw)
    }
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &String| if key.is_empty() { "" } else { "[redacted]" };
        f.debug_struct("AppSettings")
            .field("gemini_key", &redact(&self.gemini_key))
            .field("openai_key", &redact(&self.openai_key))
            .field("claude_key", &redact(&self.claude_key))
            .field("grok_key", &redact(&self.grok_key))
            .field("pitch_model", &self.pitch_model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn settings() -> AppSettings {
        AppSettings {
            gemini_key: "gem".to_string(),
            openai_key: String::new(),
            claude_key: "  ".to_string(),
            grok_key: "grok".to_string(),
            pitch_model: PitchModel::Grok,
        }
    }

    #[test]
    fn pitch_model_round_trips_through_strings() {
        for model in [
            PitchModel::Gemini,
            PitchModel::OpenAi,
            PitchModel::Claude,
            PitchModel::Grok,
        ] {
            assert_eq!(model.as_str().parse::<PitchModel>().unwrap(), model);
        }
        assert!("llama".parse::<PitchModel>().is_err());
        assert_eq!(
            serde_json::to_string(&PitchModel::OpenAi).unwrap(),
            "\"openai\""
        );
    }

    #[test]
    fn key_for_ignores_blank_keys() {
        let s = settings();
        assert_eq!(s.key_for(PitchModel::Gemini), Some("gem"));
        assert_eq!(s.key_for(PitchModel::OpenAi), None);
        assert_eq!(s.key_for(PitchModel::Claude), None);
        let presence = s.key_presence();
        assert!(presence.gemini && presence.grok);
        assert!(!presence.openai && !presence.claude);
    }

    #[test]
    fn apply_updates_only_given_fields() {
        let mut s = settings();
        s.apply(SettingsUpdate {
            openai_key: Some(" sk-new ".to_string()),
            grok_key: Some(String::new()),
            pitch_model: Some(PitchModel::OpenAi),
            ..SettingsUpdate::default()
        });
        assert_eq!(s.gemini_key, "gem");
        assert_eq!(s.openai_key, "sk-new");
        assert_eq!(s.grok_key, "");
        assert_eq!(s.pitch_model, PitchModel::OpenAi);
    }

    #[test]
    fn load_returns_fallback_when_absent_or_corrupt() {
        let store = MemoryStore::new();
        let loaded = AppSettings::load(&store, settings()).unwrap();
        assert_eq!(loaded, settings());

        store.set(SETTINGS_KEY, "{not json").unwrap();
        let loaded = AppSettings::load(&store, AppSettings::default()).unwrap();
        assert_eq!(loaded, AppSettings::default());
    }

    #[test]
    fn save_then_load_uses_persisted_values() {
        let store = MemoryStore::new();
        settings().save(&store).unwrap();
        let raw = store.get(SETTINGS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"geminiKey\":\"gem\""));
        assert!(raw.contains("\"pitchModel\":\"grok\""));

        let loaded = AppSettings::load(&store, AppSettings::default()).unwrap();
        assert_eq!(loaded, settings());
    }

    #[test]
    fn debug_redacts_keys() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains("gem\""));
        assert!(rendered.contains("[redacted]"));
    }
}
