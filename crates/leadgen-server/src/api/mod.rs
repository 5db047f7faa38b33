mod history;
mod leads;
mod pitch;
mod services;
mod settings;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use leadgen_core::{
    AppConfig, AppSettings, CoreError, KeyValueStore, SearchHistory, ServiceCatalog, StoreError,
};
use leadgen_extract::{ExtractionError, GeminiClient, PitchClients, ProviderError};
use serde::Serialize;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn KeyValueStore>,
    pub catalog: Arc<ServiceCatalog>,
    pub gemini: Arc<GeminiClient>,
    pub pitch: Arc<PitchClients>,
    /// Serializes read-modify-write cycles on the persisted history.
    history_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if a provider HTTP client cannot be
    /// built.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn KeyValueStore>,
        catalog: ServiceCatalog,
    ) -> Result<Self, ProviderError> {
        let gemini = GeminiClient::from_config(&config)?;
        let pitch = PitchClients::from_config(&config)?;
        Ok(Self {
            config,
            store,
            catalog: Arc::new(catalog),
            gemini: Arc::new(gemini),
            pitch: Arc::new(pitch),
            history_lock: Arc::new(Mutex::new(())),
        })
    }

    pub(super) fn settings(&self) -> Result<AppSettings, StoreError> {
        AppSettings::load(self.store.as_ref(), self.config.default_settings())
    }

    pub(super) fn history(&self) -> Result<SearchHistory, StoreError> {
        SearchHistory::load(self.store.as_ref(), self.config.history_limit)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    services: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "missing_credential" | "invalid_credential" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "provider_overloaded" => StatusCode::SERVICE_UNAVAILABLE,
            "empty_response" | "malformed_response" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Caller-facing extraction failures keep their code and message.
pub(super) fn map_extraction_error(request_id: String, error: &ExtractionError) -> ApiError {
    ApiError::new(request_id, error.code(), error.to_string())
}

pub(super) fn map_store_error(request_id: String, error: &StoreError) -> ApiError {
    tracing::error!(error = %error, "storage operation failed");
    ApiError::new(request_id, "internal_error", "storage operation failed")
}

pub(super) fn map_core_error(request_id: String, error: &CoreError) -> ApiError {
    ApiError::new(request_id, "validation_error", error.to_string())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([
            header::CONTENT_DISPOSITION,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/services", get(services::list_services))
        .route("/api/v1/leads/search", post(leads::search_leads))
        .route("/api/v1/leads/export", post(leads::export_leads))
        .route("/api/v1/pitch", post(pitch::generate_pitch))
        .route(
            "/api/v1/history",
            get(history::list_history).delete(history::clear_history),
        )
        .route("/api/v1/history/{id}", get(history::get_history_item))
        .route(
            "/api/v1/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    ApiResponse::new(
        req_id.0,
        HealthData {
            status: "ok",
            services: state.catalog.services.len(),
        },
    )
}
