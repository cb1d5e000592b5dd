//! Error types for the Panorama library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Panorama operations.
#[derive(Debug, Error)]
pub enum PanoramaError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column the dataset cannot do without is absent.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A filter or breakdown names a dimension the catalog does not carry.
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// A metric identifier outside the configured metric set.
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// A selection or dimension expression that cannot be interpreted.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error saving or loading a catalog specification.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for Panorama operations.
pub type Result<T> = std::result::Result<T, PanoramaError>;
