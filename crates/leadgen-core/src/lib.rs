pub mod app_config;
pub mod config;
pub mod history;
pub mod leads;
pub mod search;
pub mod services;
pub mod settings;
pub mod store;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use history::{HistoryItem, SearchHistory, DEFAULT_HISTORY_LIMIT, HISTORY_KEY};
pub use leads::{filter_leads, Lead, RawLead, ServiceId, NOT_AVAILABLE};
pub use search::{SearchParams, LEAD_COUNTS};
pub use services::{load_services, ServiceCatalog, ServiceOffer};
pub use settings::{AppSettings, KeyPresence, PitchModel, SettingsUpdate, SETTINGS_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read services file {path}: {source}")]
    ServicesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse services file: {0}")]
    ServicesFileParse(#[source] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid search: {0}")]
    InvalidSearch(String),

    #[error("unknown service id: {0}")]
    UnknownService(String),

    #[error("unknown pitch model: {0}")]
    UnknownPitchModel(String),
}
