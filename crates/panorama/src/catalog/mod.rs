//! The filter catalog: every selectable dimension and metric of a dataset.

mod filter_catalog;
mod key;
mod spec;

pub use filter_catalog::{
    CatalogEntry, CatalogSection, Dimension, FilterCatalog, MetricColumn, MetricInfo,
    PlainDimension, QuestionnaireColumn, discover,
};
pub use key::DimensionKey;
pub use spec::{CatalogSpec, ColumnSpec, MetricSpec, SectionSpec};
