//! Main Dashboard struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{Aggregator, Breakdown, BreakdownDimension, Measure};
use crate::catalog::{CatalogSpec, FilterCatalog};
use crate::error::{PanoramaError, Result};
use crate::filter::{RowMask, SelectionState, build_mask};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::store::RecordStore;

/// Configuration for loading a dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Which columns are filters, questionnaires and metrics.
    pub catalog: CatalogSpec,
}

/// One evaluation request from the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Current filter selections.
    #[serde(default)]
    pub filters: SelectionState,
    /// Metric identifier from the catalog's metric set.
    pub metric: String,
    /// Optional secondary dimension to split the filtered rows by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BreakdownDimension>,
}

impl Query {
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            filters: SelectionState::new(),
            metric: metric.into(),
            breakdown: None,
        }
    }

    pub fn with_filters(mut self, filters: SelectionState) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_breakdown(mut self, breakdown: BreakdownDimension) -> Self {
        self.breakdown = Some(breakdown);
        self
    }
}

/// Whether the filters left any respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// At least one row matched.
    Populated,
    /// Every row was filtered out.
    Empty,
}

/// The weighted average of the requested metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub id: String,
    pub display: String,
    pub value: Measure,
}

/// Numbers for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub status: ResultStatus,
    /// Number of rows that passed the filters.
    pub respondents: usize,
    /// Weight carried by those rows.
    pub weight: f64,
    /// Their share of the whole dataset's weight, in percent.
    ///
    /// An empty result is signalled by [`ResultStatus::Empty`] with a share
    /// of 0; the share is only unavailable when the dataset carries no
    /// weight at all.
    pub share: Measure,
    pub metric: MetricResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
}

/// The first filtered rows, for tabular display.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows that passed the filters, before truncation.
    pub total_rows: usize,
    pub truncated: bool,
}

/// A loaded survey dataset with its filter catalog.
///
/// Both are frozen once built; every [`Dashboard::evaluate`] call recomputes
/// from scratch using only the query it is given.
pub struct Dashboard {
    source: Option<SourceMetadata>,
    store: RecordStore,
    catalog: FilterCatalog,
}

impl Dashboard {
    /// Load a survey file with the default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, DashboardConfig::default())
    }

    /// Load a survey file and build its catalog.
    pub fn open_with_config(path: impl AsRef<Path>, config: DashboardConfig) -> Result<Self> {
        let parser = Parser::with_config(config.parser.clone());
        let (table, source) = parser.parse_file(path)?;
        let mut dashboard = Self::from_table(table, &config.catalog)?;
        dashboard.source = Some(source);
        Ok(dashboard)
    }

    /// Build from an already parsed table.
    pub fn from_table(table: DataTable, spec: &CatalogSpec) -> Result<Self> {
        let store = RecordStore::from_table(table, &spec.weight_column)?;
        let catalog = FilterCatalog::build(&store, spec)?;
        Ok(Self {
            source: None,
            store,
            catalog,
        })
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    /// Row mask for a selection state.
    pub fn mask(&self, filters: &SelectionState) -> Result<RowMask> {
        build_mask(self.store.len(), &self.catalog, filters)
    }

    /// Compute share, metric and optional breakdown for a query.
    pub fn evaluate(&self, query: &Query) -> Result<Evaluation> {
        let metric = self
            .catalog
            .metric(&query.metric)
            .ok_or_else(|| PanoramaError::UnknownMetric(query.metric.clone()))?;

        let mask = self.mask(&query.filters)?;
        let aggregator = Aggregator::new(&self.store, &self.catalog);

        let respondents = mask.count();
        let breakdown = query
            .breakdown
            .as_ref()
            .map(|dimension| aggregator.breakdown(&mask, dimension, metric))
            .transpose()?;

        let evaluation = Evaluation {
            status: if respondents == 0 {
                ResultStatus::Empty
            } else {
                ResultStatus::Populated
            },
            respondents,
            weight: aggregator.weight_sum(&mask),
            share: aggregator.weight_share(&mask),
            metric: MetricResult {
                id: metric.id.clone(),
                display: metric.display.clone(),
                value: aggregator.weighted_metric(&mask, metric),
            },
            breakdown,
        };

        debug!(
            metric = %query.metric,
            respondents,
            share = ?evaluation.share.value(),
            "evaluated query"
        );
        Ok(evaluation)
    }

    /// Headers and the first `limit` rows passing the filters.
    pub fn preview(&self, filters: &SelectionState, limit: usize) -> Result<Preview> {
        let mask = self.mask(filters)?;
        let total_rows = mask.count();
        let rows = mask
            .selected()
            .take(limit)
            .filter_map(|row| self.store.row(row).map(|cells| cells.to_vec()))
            .collect();

        Ok(Preview {
            headers: self.store.headers().to_vec(),
            rows,
            total_rows,
            truncated: total_rows > limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DimensionKey;
    use crate::filter::Selection;

    fn dashboard() -> Dashboard {
        let table = Parser::new()
            .parse_bytes(b"weight,gender,atlas_mh_index\n1,F,10\n3,M,20\n")
            .unwrap();
        Dashboard::from_table(table, &CatalogSpec::default()).unwrap()
    }

    #[test]
    fn test_evaluate_filtered() {
        let dash = dashboard();
        let filters = SelectionState::new()
            .with(DimensionKey::plain("gender"), Selection::from_choices(["F"]));
        let eval = dash.evaluate(&Query::new("icasm").with_filters(filters)).unwrap();

        assert_eq!(eval.status, ResultStatus::Populated);
        assert_eq!(eval.respondents, 1);
        assert_eq!(eval.share, Measure::Available(25.0));
        assert_eq!(eval.metric.value, Measure::Available(10.0));
        assert_eq!(eval.metric.display, "ICASM");
    }

    #[test]
    fn test_evaluate_empty_result() {
        let dash = dashboard();
        let filters = SelectionState::new()
            .with(DimensionKey::plain("gender"), Selection::from_choices(["X"]));
        let eval = dash.evaluate(&Query::new("icasm").with_filters(filters)).unwrap();

        assert_eq!(eval.status, ResultStatus::Empty);
        assert_eq!(eval.share, Measure::Available(0.0));
        assert_eq!(eval.metric.value, Measure::Unavailable);
    }

    #[test]
    fn test_unknown_metric_fails() {
        let dash = dashboard();
        // The default catalog names "vitality" but this dataset lacks the column
        let err = dash.evaluate(&Query::new("vitality")).unwrap_err();
        assert!(matches!(err, PanoramaError::UnknownMetric(m) if m == "vitality"));
    }

    #[test]
    fn test_breakdown_included() {
        let dash = dashboard();
        let query = Query::new("icasm").with_breakdown("gender".parse().unwrap());
        let eval = dash.evaluate(&query).unwrap();
        let breakdown = eval.breakdown.unwrap();
        assert_eq!(breakdown.len(), 2);
        assert!((breakdown.total_share() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_preview_truncates() {
        let dash = dashboard();
        let preview = dash.preview(&SelectionState::new(), 1).unwrap();
        assert_eq!(preview.total_rows, 2);
        assert!(preview.truncated);
        assert_eq!(preview.rows, vec![vec!["1", "F", "10"]]);
    }

    #[test]
    fn test_query_json() {
        let json = r#"{
            "filters": [{"dimension": {"kind": "plain", "column": "gender"}, "selection": ["M"]}],
            "metric": "icasm",
            "breakdown": {"kind": "plain", "column": "gender"}
        }"#;
        let query: Query = serde_json::from_str(json).unwrap();
        let eval = dashboard().evaluate(&query).unwrap();
        assert_eq!(eval.share, Measure::Available(75.0));
        assert_eq!(eval.metric.value, Measure::Available(20.0));
    }
}
