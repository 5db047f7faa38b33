use axum::{extract::State, Extension, Json};
use leadgen_core::ServiceOffer;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

pub(super) async fn list_services(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<ServiceOffer>>> {
    ApiResponse::new(req_id.0, state.catalog.services.clone())
}
