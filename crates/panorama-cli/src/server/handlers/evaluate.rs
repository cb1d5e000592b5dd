//! Query evaluation handler.

use axum::{Json, extract::State};
use panorama::{Evaluation, Query};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Evaluate one query against the loaded dataset.
pub async fn evaluate(
    State(state): State<AppState>,
    Json(query): Json<Query>,
) -> Result<Json<Evaluation>, ApiError> {
    let evaluation = state.dashboard.evaluate(&query)?;
    Ok(Json(evaluation))
}
