//! Catalog construction and lookup.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use super::key::DimensionKey;
use super::spec::CatalogSpec;
use crate::error::Result;
use crate::questionnaire::{AnswerItem, parse_answers};
use crate::store::{FieldValue, RecordStore};

/// A plain categorical column bound to one filter.
#[derive(Debug, Clone)]
pub struct PlainDimension {
    pub column: String,
    pub display: String,
    /// Typed value of every row, in row order.
    pub values: Vec<FieldValue>,
    /// Distinct observed values, sorted.
    pub options: Vec<FieldValue>,
}

/// A questionnaire column decoded once at catalog build time.
#[derive(Debug, Clone)]
pub struct QuestionnaireColumn {
    pub column: String,
    pub display: String,
    /// Decoded answer items of every row, in row order.
    pub answers: Vec<Vec<AnswerItem>>,
    /// Observed labels (sorted) and their sorted observed values.
    pub labels: IndexMap<String, Vec<FieldValue>>,
}

impl QuestionnaireColumn {
    /// Whether row `row` answered `label` with a value accepted by `accept`.
    pub fn row_matches(&self, row: usize, label: &str, accept: impl Fn(&FieldValue) -> bool) -> bool {
        self.answers
            .get(row)
            .is_some_and(|items| items.iter().any(|i| i.label == label && accept(&i.value)))
    }
}

/// A metric column with its parsed scores.
#[derive(Debug, Clone)]
pub struct MetricColumn {
    pub id: String,
    pub column: String,
    pub display: String,
    pub scores: Vec<Option<f64>>,
}

/// A resolved dimension, borrowed from the catalog.
#[derive(Debug, Clone, Copy)]
pub enum Dimension<'a> {
    Plain(&'a PlainDimension),
    Question {
        questionnaire: &'a QuestionnaireColumn,
        label: &'a str,
    },
}

impl Dimension<'_> {
    /// Sorted options the user may pick from.
    pub fn options(&self) -> &[FieldValue] {
        match self {
            Dimension::Plain(plain) => &plain.options,
            Dimension::Question {
                questionnaire,
                label,
            } => questionnaire
                .labels
                .get(*label)
                .map(|v| v.as_slice())
                .unwrap_or(&[]),
        }
    }
}

/// A titled group of dimensions, in presentation order.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSection {
    pub title: String,
    pub dimensions: Vec<DimensionKey>,
}

/// Presentation view of one selectable dimension.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub key: DimensionKey,
    pub section: String,
    pub display: String,
    pub options: Vec<FieldValue>,
}

/// Presentation view of one metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricInfo {
    pub id: String,
    pub display: String,
}

/// Every filterable dimension and metric available in one dataset.
///
/// Built once per [`RecordStore`]; columns named by the [`CatalogSpec`] but
/// absent from the dataset never appear, so lookups past this point only
/// see dimensions the data can answer.
#[derive(Debug, Clone)]
pub struct FilterCatalog {
    sections: Vec<CatalogSection>,
    plain: IndexMap<String, PlainDimension>,
    questionnaires: IndexMap<String, QuestionnaireColumn>,
    metrics: IndexMap<String, MetricColumn>,
    skipped: Vec<String>,
}

impl FilterCatalog {
    /// Build the catalog for `store` from its [`CatalogSpec`].
    pub fn build(store: &RecordStore, spec: &CatalogSpec) -> Result<Self> {
        spec.validate()?;

        let mut skipped = Vec::new();
        let mut sections = Vec::new();
        let mut plain = IndexMap::new();

        for section in &spec.sections {
            let mut dimensions = Vec::new();
            for filter in &section.filters {
                let Some(values) = store.field_values(&filter.column) else {
                    warn!(column = %filter.column, "filter column not in dataset, skipping");
                    skipped.push(filter.column.clone());
                    continue;
                };
                let options: BTreeSet<FieldValue> = values.iter().cloned().collect();
                dimensions.push(DimensionKey::plain(&filter.column));
                plain.insert(
                    filter.column.clone(),
                    PlainDimension {
                        column: filter.column.clone(),
                        display: filter.display.clone(),
                        values,
                        options: options.into_iter().collect(),
                    },
                );
            }
            if !dimensions.is_empty() {
                sections.push(CatalogSection {
                    title: section.title.clone(),
                    dimensions,
                });
            }
        }

        let mut questionnaires = IndexMap::new();
        for q in &spec.questionnaires {
            let Some(cells) = store.raw_column(&q.column) else {
                warn!(column = %q.column, "questionnaire column not in dataset, skipping");
                skipped.push(q.column.clone());
                continue;
            };
            let answers: Vec<Vec<AnswerItem>> = cells
                .into_iter()
                .map(|cell| parse_answers(Some(cell), &q.column))
                .collect();
            let labels = discover_answers(&answers);
            debug!(column = %q.column, labels = labels.len(), "discovered questionnaire labels");

            let dimensions: Vec<DimensionKey> = labels
                .keys()
                .map(|label| DimensionKey::question(&q.column, label))
                .collect();
            if !dimensions.is_empty() {
                sections.push(CatalogSection {
                    title: q.display.clone(),
                    dimensions,
                });
            }
            questionnaires.insert(
                q.column.clone(),
                QuestionnaireColumn {
                    column: q.column.clone(),
                    display: q.display.clone(),
                    answers,
                    labels,
                },
            );
        }

        let mut metrics = IndexMap::new();
        for m in &spec.metrics {
            let Some(scores) = store.scores(&m.column) else {
                warn!(metric = %m.id, column = %m.column, "metric column not in dataset, skipping");
                skipped.push(m.column.clone());
                continue;
            };
            metrics.insert(
                m.id.clone(),
                MetricColumn {
                    id: m.id.clone(),
                    column: m.column.clone(),
                    display: m.display.clone(),
                    scores,
                },
            );
        }

        debug!(
            plain = plain.len(),
            questionnaires = questionnaires.len(),
            metrics = metrics.len(),
            skipped = skipped.len(),
            "filter catalog built"
        );

        Ok(Self {
            sections,
            plain,
            questionnaires,
            metrics,
            skipped,
        })
    }

    /// Resolve a dimension key, or `None` when the catalog does not carry it.
    pub fn dimension(&self, key: &DimensionKey) -> Option<Dimension<'_>> {
        match key {
            DimensionKey::Plain { column } => self.plain.get(column).map(Dimension::Plain),
            DimensionKey::Question { column, label } => {
                let questionnaire = self.questionnaires.get(column)?;
                let (label, _) = questionnaire.labels.get_key_value(label)?;
                Some(Dimension::Question {
                    questionnaire,
                    label: label.as_str(),
                })
            }
        }
    }

    pub fn plain(&self, column: &str) -> Option<&PlainDimension> {
        self.plain.get(column)
    }

    pub fn questionnaire(&self, column: &str) -> Option<&QuestionnaireColumn> {
        self.questionnaires.get(column)
    }

    pub fn metric(&self, id: &str) -> Option<&MetricColumn> {
        self.metrics.get(id)
    }

    pub fn sections(&self) -> &[CatalogSection] {
        &self.sections
    }

    /// Every selectable dimension, in presentation order.
    pub fn dimensions(&self) -> impl Iterator<Item = &DimensionKey> {
        self.sections.iter().flat_map(|s| s.dimensions.iter())
    }

    /// Presentation entries for every selectable dimension.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.sections
            .iter()
            .flat_map(|section| self.section_entries(section))
            .collect()
    }

    /// Presentation entries for the dimensions of one section, in order.
    pub fn section_entries(&self, section: &CatalogSection) -> Vec<CatalogEntry> {
        section
            .dimensions
            .iter()
            .filter_map(|key| {
                let dimension = self.dimension(key)?;
                let display = match dimension {
                    Dimension::Plain(plain) => plain.display.clone(),
                    Dimension::Question { label, .. } => label.to_string(),
                };
                Some(CatalogEntry {
                    key: key.clone(),
                    section: section.title.clone(),
                    display,
                    options: dimension.options().to_vec(),
                })
            })
            .collect()
    }

    /// The metric set, in configured order.
    pub fn metrics(&self) -> Vec<MetricInfo> {
        self.metrics
            .values()
            .map(|m| MetricInfo {
                id: m.id.clone(),
                display: m.display.clone(),
            })
            .collect()
    }

    pub fn questionnaires(&self) -> impl Iterator<Item = &QuestionnaireColumn> {
        self.questionnaires.values()
    }

    /// Configured columns that the dataset did not carry.
    pub fn skipped_columns(&self) -> &[String] {
        &self.skipped
    }
}

/// Scan a questionnaire column and collect every label with its observed
/// values, both sorted. Returns `None` when the column is absent.
pub fn discover(store: &RecordStore, column: &str) -> Option<IndexMap<String, Vec<FieldValue>>> {
    let cells = store.raw_column(column)?;
    let answers: Vec<Vec<AnswerItem>> = cells
        .into_iter()
        .map(|cell| parse_answers(Some(cell), column))
        .collect();
    Some(discover_answers(&answers))
}

fn discover_answers(answers: &[Vec<AnswerItem>]) -> IndexMap<String, Vec<FieldValue>> {
    let mut labels: BTreeMap<&str, BTreeSet<&FieldValue>> = BTreeMap::new();
    for item in answers.iter().flatten() {
        labels.entry(item.label.as_str()).or_default().insert(&item.value);
    }
    labels
        .into_iter()
        .map(|(label, values)| (label.to_string(), values.into_iter().cloned().collect()))
        .collect()
}
