use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use leadgen_core::{Lead, SearchParams, StoreError, LEAD_COUNTS};
use leadgen_extract::{extract_leads, leads_to_csv};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{
    map_core_error, map_extraction_error, map_store_error, ApiError, ApiResponse, AppState,
};

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    niche: String,
    location: String,
    count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchResult {
    /// `None` when the search could not be saved to history.
    history_id: Option<String>,
    niche: String,
    location: String,
    count: u32,
    leads: Vec<Lead>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ExportRequest {
    leads: Vec<Lead>,
    niche: Option<String>,
    location: Option<String>,
}

pub(super) async fn search_leads(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchResult>>, ApiError> {
    let params = SearchParams::new(
        &body.niche,
        &body.location,
        body.count.unwrap_or(LEAD_COUNTS[0]),
    )
    .map_err(|e| map_core_error(req_id.0.clone(), &e))?;

    let settings = state
        .settings()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    let leads = extract_leads(
        state.gemini.as_ref(),
        &settings.gemini_key,
        &params,
        state.config.extraction_temperature,
        None,
    )
    .await
    .map_err(|e| map_extraction_error(req_id.0.clone(), &e))?;

    let history_id = match record_search(&state, &params, &leads).await {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(error = %e, niche = %params.niche, "search not saved to history");
            None
        }
    };

    Ok(ApiResponse::new(
        req_id.0,
        SearchResult {
            history_id,
            niche: params.niche,
            location: params.location,
            count: params.count,
            leads,
        },
    ))
}

async fn record_search(
    state: &AppState,
    params: &SearchParams,
    leads: &[Lead],
) -> Result<String, StoreError> {
    let _guard = state.history_lock.lock().await;
    let mut history = state.history()?;
    let id = history.record(params.clone(), leads.to_vec()).id.clone();
    history.save(state.store.as_ref())?;
    Ok(id)
}

pub(super) async fn export_leads(
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    if body.leads.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "no leads to export",
        ));
    }

    let filename = format!(
        "{}.csv",
        export_stem(body.niche.as_deref(), body.location.as_deref())
    );
    tracing::info!(leads = body.leads.len(), filename = %filename, "exporting leads");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        leads_to_csv(&body.leads),
    )
        .into_response())
}

/// `leads-{niche}-{location}` when both are given, else `leads`.
fn export_stem(niche: Option<&str>, location: Option<&str>) -> String {
    let stem = match (niche, location) {
        (Some(niche), Some(location)) => SearchParams::new(niche, location, LEAD_COUNTS[0])
            .map_or_else(|_| "leads".to_string(), |p| p.export_stem()),
        _ => "leads".to_string(),
    };
    stem.chars()
        .filter(|c| *c != '"' && !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_stem_uses_search_terms_when_present() {
        assert_eq!(
            export_stem(Some("Plumber"), Some("Austin TX")),
            "leads-plumber-austin-tx"
        );
        assert_eq!(export_stem(Some("Plumber"), None), "leads");
        assert_eq!(export_stem(Some("  "), Some("Austin")), "leads");
    }

    #[test]
    fn export_stem_strips_quotes() {
        assert_eq!(
            export_stem(Some("\"Best\" Plumber"), Some("Austin")),
            "leads-best-plumber-austin"
        );
    }
}
