//! Filter catalog handler.

use axum::{Json, extract::State};
use panorama::{CatalogEntry, MetricInfo};
use serde::Serialize;

use crate::server::state::AppState;

/// Everything the page needs to draw its filter widgets.
#[derive(Serialize)]
pub struct CatalogResponse {
    pub source: SourceInfo,
    pub sections: Vec<SectionInfo>,
    pub metrics: Vec<MetricInfo>,
    pub skipped_columns: Vec<String>,
}

#[derive(Serialize)]
pub struct SourceInfo {
    pub file: String,
    /// Content hash of the survey file, when loaded from disk.
    pub hash: Option<String>,
    pub respondents: usize,
    pub total_weight: f64,
    /// Rows whose weight could not be used and counted as zero.
    pub invalid_weights: usize,
}

#[derive(Serialize)]
pub struct SectionInfo {
    pub title: String,
    pub dimensions: Vec<CatalogEntry>,
}

/// Get the filter catalog of the loaded dataset.
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let dashboard = &state.dashboard;
    let catalog = dashboard.catalog();
    let store = dashboard.store();

    let (file, hash) = match dashboard.source() {
        Some(source) => (source.file.clone(), Some(source.hash.clone())),
        None => (state.data_path.display().to_string(), None),
    };

    let sections = catalog
        .sections()
        .iter()
        .map(|section| SectionInfo {
            title: section.title.clone(),
            dimensions: catalog.section_entries(section),
        })
        .collect();

    Json(CatalogResponse {
        source: SourceInfo {
            file,
            hash,
            respondents: store.len(),
            total_weight: store.total_weight(),
            invalid_weights: store.invalid_weights(),
        },
        sections,
        metrics: catalog.metrics(),
        skipped_columns: catalog.skipped_columns().to_vec(),
    })
}
