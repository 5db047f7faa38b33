use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use leadgen_core::{filter_leads, HistoryItem};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct HistorySummary {
    id: String,
    created_at: DateTime<Utc>,
    niche: String,
    location: String,
    count: u32,
    lead_count: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryQuery {
    /// Case-insensitive match on lead name or address.
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ClearedHistory {
    cleared: usize,
}

pub(super) async fn list_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<HistorySummary>>>, ApiError> {
    let history = state
        .history()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    let data = history
        .items()
        .iter()
        .map(|item| HistorySummary {
            id: item.id.clone(),
            created_at: item.created_at,
            niche: item.params.niche.clone(),
            location: item.params.location.clone(),
            count: item.params.count,
            lead_count: item.leads.len(),
        })
        .collect();

    Ok(ApiResponse::new(req_id.0, data))
}

pub(super) async fn get_history_item(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryItem>>, ApiError> {
    let history = state
        .history()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    let Some(item) = history.find(&id) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            "history item not found",
        ));
    };

    let mut item = item.clone();
    if let Some(filter) = query.filter.as_deref() {
        item.leads = filter_leads(&item.leads, filter)
            .into_iter()
            .cloned()
            .collect();
    }

    Ok(ApiResponse::new(req_id.0, item))
}

pub(super) async fn clear_history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ClearedHistory>>, ApiError> {
    let _guard = state.history_lock.lock().await;
    let mut history = state
        .history()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    let cleared = history.len();
    history.clear();
    history
        .save(state.store.as_ref())
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;
    tracing::info!(cleared, "history cleared");

    Ok(ApiResponse::new(req_id.0, ClearedHistory { cleared }))
}
