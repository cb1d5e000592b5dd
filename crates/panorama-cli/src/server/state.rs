//! Application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use panorama::Dashboard;

/// Shared application state.
///
/// The dashboard is read-only once loaded; each request brings its own
/// filter selections, so no lock is needed.
#[derive(Clone)]
pub struct AppState {
    /// The loaded dataset and its filter catalog.
    pub dashboard: Arc<Dashboard>,
    /// Path to the survey file.
    pub data_path: PathBuf,
}

impl AppState {
    pub fn new(dashboard: Dashboard, data_path: PathBuf) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            data_path,
        }
    }
}
