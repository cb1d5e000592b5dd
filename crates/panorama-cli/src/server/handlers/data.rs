//! Data preview handler.

use axum::{Json, extract::State};
use panorama::{Preview, SelectionState};
use serde::Deserialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request for the data preview endpoint.
#[derive(Deserialize, Default)]
pub struct PreviewRequest {
    /// Filters the previewed rows must pass.
    #[serde(default)]
    pub filters: SelectionState,
    /// Number of rows wanted; capped at [`MAX_PREVIEW_ROWS`].
    pub limit: Option<usize>,
}

/// Maximum number of rows to return in preview.
pub const MAX_PREVIEW_ROWS: usize = 100;

/// Get the first rows passing the filters.
pub async fn get_data_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<Preview>, ApiError> {
    let limit = request.limit.unwrap_or(MAX_PREVIEW_ROWS).min(MAX_PREVIEW_ROWS);
    let preview = state.dashboard.preview(&request.filters, limit)?;
    Ok(Json(preview))
}
