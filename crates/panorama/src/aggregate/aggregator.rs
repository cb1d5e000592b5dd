//! Weighted aggregation over row masks.

use std::collections::BTreeMap;

use super::breakdown::{Breakdown, BreakdownDimension, BreakdownGroup};
use super::measure::Measure;
use crate::catalog::{Dimension, DimensionKey, FilterCatalog, MetricColumn};
use crate::error::{PanoramaError, Result};
use crate::filter::{Predicate, RowMask};
use crate::store::{FieldValue, RecordStore};

/// Computes weighted shares and metric averages over a record store.
///
/// Every percentage and average is weighted by the respondent weight; plain
/// row counts are reported alongside but never used as denominators.
pub struct Aggregator<'a> {
    store: &'a RecordStore,
    catalog: &'a FilterCatalog,
}

impl<'a> Aggregator<'a> {
    pub fn new(store: &'a RecordStore, catalog: &'a FilterCatalog) -> Self {
        Self { store, catalog }
    }

    /// Sum of the weights of the selected rows.
    pub fn weight_sum(&self, mask: &RowMask) -> f64 {
        // fold from +0.0: an empty `sum()` of f64 is -0.0
        mask.selected().fold(0.0, |acc, row| acc + self.store.weight(row))
    }

    /// Share of the whole store's weight carried by the selected rows, in percent.
    pub fn weight_share(&self, mask: &RowMask) -> Measure {
        Measure::percentage(self.weight_sum(mask), self.store.total_weight())
    }

    /// Share of `outer`'s weight carried by `mask`, in percent.
    pub fn share_of(&self, mask: &RowMask, outer: &RowMask) -> Measure {
        Measure::percentage(self.weight_sum(mask), self.weight_sum(outer))
    }

    /// Weighted average of a metric over the selected rows.
    ///
    /// Rows without a score add nothing to the numerator but their weight
    /// still counts in the denominator.
    pub fn weighted_metric(&self, mask: &RowMask, metric: &MetricColumn) -> Measure {
        let numerator = mask.selected().fold(0.0, |acc, row| {
            match metric.scores.get(row).copied().flatten() {
                Some(score) => acc + score * self.store.weight(row),
                None => acc,
            }
        });
        Measure::ratio(numerator, self.weight_sum(mask))
    }

    /// Split the rows selected by `outer` along `dimension`.
    ///
    /// Shares are relative to `outer`'s weight, so for a plain dimension
    /// they sum to 100% of the filtered population.
    pub fn breakdown(
        &self,
        outer: &RowMask,
        dimension: &BreakdownDimension,
        metric: &MetricColumn,
    ) -> Result<Breakdown> {
        let outer_weight = self.weight_sum(outer);

        let groups = match dimension {
            BreakdownDimension::Plain { column } => {
                let plain = self
                    .catalog
                    .plain(column)
                    .ok_or_else(|| PanoramaError::UnknownDimension(dimension.to_string()))?;
                let mut by_value: BTreeMap<&FieldValue, Vec<usize>> = BTreeMap::new();
                for row in outer.selected() {
                    if let Some(value) = plain.values.get(row) {
                        by_value.entry(value).or_default().push(row);
                    }
                }
                by_value
                    .into_iter()
                    .map(|(value, rows)| {
                        let mut bits = vec![false; outer.len()];
                        for row in rows {
                            bits[row] = true;
                        }
                        self.group(None, value.clone(), &RowMask::from(bits), outer_weight, metric)
                    })
                    .collect()
            }
            BreakdownDimension::Question { column, label } => {
                let key = DimensionKey::question(column, label);
                let resolved = self
                    .catalog
                    .dimension(&key)
                    .ok_or_else(|| PanoramaError::UnknownDimension(dimension.to_string()))?;
                self.question_groups(outer, resolved, outer_weight, metric)
            }
            BreakdownDimension::Questionnaire { column } => {
                let questionnaire = self
                    .catalog
                    .questionnaire(column)
                    .ok_or_else(|| PanoramaError::UnknownDimension(dimension.to_string()))?;
                let mut groups = Vec::new();
                for label in questionnaire.labels.keys() {
                    let resolved = Dimension::Question {
                        questionnaire,
                        label: label.as_str(),
                    };
                    groups.extend(self.question_groups(outer, resolved, outer_weight, metric));
                }
                groups
            }
        };

        Ok(Breakdown {
            dimension: dimension.clone(),
            groups,
        })
    }

    /// One group per catalogued value of a question, matched rows or not.
    fn question_groups(
        &self,
        outer: &RowMask,
        dimension: Dimension<'_>,
        outer_weight: f64,
        metric: &MetricColumn,
    ) -> Vec<BreakdownGroup> {
        let Dimension::Question { label, .. } = dimension else {
            return Vec::new();
        };
        dimension
            .options()
            .iter()
            .map(|value| {
                let predicate = Predicate::equals(dimension, value.clone());
                let sub = outer.restrict(|row| predicate.matches(row));
                self.group(Some(label.to_string()), value.clone(), &sub, outer_weight, metric)
            })
            .collect()
    }

    fn group(
        &self,
        label: Option<String>,
        value: FieldValue,
        sub: &RowMask,
        outer_weight: f64,
        metric: &MetricColumn,
    ) -> BreakdownGroup {
        let weight = self.weight_sum(sub);
        BreakdownGroup {
            label,
            value,
            respondents: sub.count(),
            weight,
            share: Measure::percentage(weight, outer_weight),
            metric: self.weighted_metric(sub, metric),
        }
    }
}
