//! The immutable respondent store.

use tracing::{debug, warn};

use super::value::FieldValue;
use crate::error::{PanoramaError, Result};
use crate::input::DataTable;

/// Respondent rows plus their sampling weights.
///
/// Built once per loaded file and never mutated afterwards, so it can be
/// shared between concurrent readers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    table: DataTable,
    weight_column: String,
    weights: Vec<f64>,
    total_weight: f64,
    invalid_weights: usize,
}

impl RecordStore {
    /// Build a store from a parsed table, reading weights from `weight_column`.
    ///
    /// Weight cells that are missing, non-numeric, non-finite or negative
    /// contribute a weight of zero.
    pub fn from_table(table: DataTable, weight_column: &str) -> Result<Self> {
        let index = table
            .column_index(weight_column)
            .ok_or_else(|| PanoramaError::MissingColumn(weight_column.to_string()))?;

        let mut invalid_weights = 0;
        let weights: Vec<f64> = table
            .column_values(index)
            .map(|cell| match cell.trim().parse::<f64>() {
                Ok(w) if w.is_finite() && w >= 0.0 => w,
                _ => {
                    invalid_weights += 1;
                    0.0
                }
            })
            .collect();

        if invalid_weights > 0 {
            warn!(
                column = weight_column,
                rows = invalid_weights,
                "weight cells without a usable value count as zero"
            );
        }

        let total_weight = weights.iter().sum();
        debug!(rows = weights.len(), total_weight, "record store ready");

        Ok(Self {
            table,
            weight_column: weight_column.to_string(),
            weights,
            total_weight,
            invalid_weights,
        })
    }

    /// Number of respondent rows.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight(&self, row: usize) -> f64 {
        self.weights.get(row).copied().unwrap_or(0.0)
    }

    /// Sum of every row's weight.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Rows whose weight cell could not be used.
    pub fn invalid_weights(&self) -> usize {
        self.invalid_weights
    }

    pub fn weight_column(&self) -> &str {
        &self.weight_column
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.table.has_column(name)
    }

    /// Raw row cells, in header order.
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.table.rows.get(row).map(|r| r.as_slice())
    }

    /// Raw cells of a column, or `None` when the column is absent.
    pub fn raw_column(&self, column: &str) -> Option<Vec<&str>> {
        self.table.column_by_name(column)
    }

    /// Typed categorical values of a column.
    pub fn field_values(&self, column: &str) -> Option<Vec<FieldValue>> {
        let index = self.table.column_index(column)?;
        Some(self.table.column_values(index).map(FieldValue::from_cell).collect())
    }

    /// Numeric scores of a column; non-numeric cells read as `None`.
    pub fn scores(&self, column: &str) -> Option<Vec<Option<f64>>> {
        let index = self.table.column_index(column)?;
        Some(
            self.table
                .column_values(index)
                .map(|cell| FieldValue::from_cell(cell).as_f64())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 3]]) -> DataTable {
        DataTable::new(
            vec!["weight".into(), "gender".into(), "atlas_mh_index".into()],
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
            b',',
        )
    }

    #[test]
    fn test_weights_and_total() {
        let store = RecordStore::from_table(table(&[["1", "F", "10"], ["3", "M", "20"]]), "weight")
            .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_weight(), 4.0);
        assert_eq!(store.invalid_weights(), 0);
    }

    #[test]
    fn test_invalid_weights_count_as_zero() {
        let store = RecordStore::from_table(
            table(&[["", "F", "1"], ["-2", "M", "1"], ["abc", "M", "1"], ["0.5", "F", "1"]]),
            "weight",
        )
        .unwrap();
        assert_eq!(store.weights(), &[0.0, 0.0, 0.0, 0.5]);
        assert_eq!(store.invalid_weights(), 3);
    }

    #[test]
    fn test_missing_weight_column() {
        let err = RecordStore::from_table(table(&[["1", "F", "1"]]), "peso").unwrap_err();
        assert!(matches!(err, PanoramaError::MissingColumn(c) if c == "peso"));
    }

    #[test]
    fn test_scores() {
        let store = RecordStore::from_table(table(&[["1", "F", "10.5"], ["1", "M", "NA"]]), "weight")
            .unwrap();
        assert_eq!(store.scores("atlas_mh_index"), Some(vec![Some(10.5), None]));
        assert!(store.scores("vitality_index").is_none());
    }
}
