//! Panorama: weighted filtering and aggregation for survey panel dashboards.
//!
//! A survey file is loaded once into an immutable [`RecordStore`], from which
//! a [`FilterCatalog`] of selectable dimensions is derived. Each user
//! interaction then produces a fresh [`SelectionState`], which is turned into
//! a row mask and aggregated into weighted shares and metric averages.
//!
//! # Core Principles
//!
//! - **Weighted**: every percentage and average uses respondent weights
//! - **Tolerant**: malformed questionnaire cells decode to "no answers"
//! - **Explicit**: undefined aggregates are reported as unavailable, never NaN
//!
//! # Example
//!
//! ```no_run
//! use panorama::{Dashboard, DimensionKey, Query, Selection, SelectionState};
//!
//! let dashboard = Dashboard::open("BaseGeral.csv").unwrap();
//! let filters = SelectionState::new()
//!     .with(DimensionKey::plain("gender"), Selection::from_choices(["Feminino"]));
//! let result = dashboard
//!     .evaluate(&Query::new("icasm").with_filters(filters))
//!     .unwrap();
//!
//! println!("Respondents: {:.2}%", result.share);
//! println!("ICASM: {:.2}", result.metric.value);
//! ```

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod input;
pub mod questionnaire;
pub mod store;

mod dashboard;

pub use crate::dashboard::{
    Dashboard, DashboardConfig, Evaluation, MetricResult, Preview, Query, ResultStatus,
};
pub use aggregate::{Aggregator, Breakdown, BreakdownDimension, BreakdownGroup, Measure};
pub use catalog::{CatalogEntry, CatalogSpec, DimensionKey, FilterCatalog, MetricInfo};
pub use error::{PanoramaError, Result};
pub use filter::{RowMask, Selection, SelectionState, build_mask};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use questionnaire::{AnswerItem, parse_answers};
pub use store::{FieldValue, RecordStore};
