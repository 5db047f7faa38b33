use axum::{extract::State, Extension, Json};
use leadgen_core::{AppSettings, KeyPresence, PitchModel, SettingsUpdate};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

/// Settings as reported to clients. Key values never leave the server.
#[derive(Debug, Serialize)]
pub(super) struct SettingsView {
    pitch_model: PitchModel,
    keys: KeyPresence,
}

impl From<&AppSettings> for SettingsView {
    fn from(settings: &AppSettings) -> Self {
        Self {
            pitch_model: settings.pitch_model,
            keys: settings.key_presence(),
        }
    }
}

pub(super) async fn get_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<SettingsView>>, ApiError> {
    let settings = state
        .settings()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;
    Ok(ApiResponse::new(req_id.0, SettingsView::from(&settings)))
}

pub(super) async fn update_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<ApiResponse<SettingsView>>, ApiError> {
    let mut settings = state
        .settings()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;
    settings.apply(update);
    settings
        .save(state.store.as_ref())
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;
    tracing::info!(pitch_model = %settings.pitch_model, "settings updated");

    Ok(ApiResponse::new(req_id.0, SettingsView::from(&settings)))
}
