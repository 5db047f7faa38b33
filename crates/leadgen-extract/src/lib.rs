//! Lead extraction for leadgen.
//!
//! Sends one grounded generation request per search, then sanitizes,
//! normalizes and tags the returned records with a recommended service.
//! Also hosts the provider clients used for pitch generation and the CSV
//! export format.

pub mod anthropic;
pub mod error;
pub mod export;
pub mod gemini;
pub mod normalize;
pub mod openai;
pub mod pipeline;
pub mod pitch;
pub mod prompt;
pub mod provider;
pub mod recommend;
pub mod sanitize;

pub use anthropic::AnthropicClient;
pub use error::{classify, ExtractionError, ProviderError};
pub use export::{leads_to_csv, CSV_HEADER};
pub use gemini::GeminiClient;
pub use normalize::{maps_link, normalize};
pub use openai::ChatCompletionsClient;
pub use pipeline::{extract_leads, parse_leads, Progress, ProgressFn, DEFAULT_EXTRACTION_TEMPERATURE};
pub use pitch::{pitch_service, resolve_pitch_route, Pitch, PitchClients, PitchRoute};
pub use provider::{GenerationBackend, GenerationRequest, SearchTool};
pub use recommend::{recommend, recommend_for};
pub use sanitize::sanitize;
