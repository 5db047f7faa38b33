use axum::{extract::State, Extension, Json};
use leadgen_core::{Lead, ServiceId};
use leadgen_extract::{pitch_service, Pitch};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_extraction_error, map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct PitchRequest {
    lead: Lead,
    /// Defaults to the lead's recommended service.
    service_id: Option<ServiceId>,
}

pub(super) async fn generate_pitch(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PitchRequest>,
) -> Result<Json<ApiResponse<Pitch>>, ApiError> {
    let Some(offer) = pitch_service(&state.catalog, &body.lead, body.service_id) else {
        let id = body.service_id.unwrap_or(body.lead.recommended_service);
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("service '{id}' is not in the catalog"),
        ));
    };

    let settings = state
        .settings()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    let pitch = state
        .pitch
        .generate_pitch(&settings, offer, &body.lead)
        .await
        .map_err(|e| map_extraction_error(req_id.0.clone(), &e))?;

    Ok(ApiResponse::new(req_id.0, pitch))
}
