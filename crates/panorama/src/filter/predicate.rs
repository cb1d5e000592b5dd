//! Turning selections into row predicates and masks.

use std::collections::BTreeSet;

use tracing::debug;

use super::mask::RowMask;
use super::selection::{Selection, SelectionState};
use crate::catalog::{Dimension, DimensionKey, FilterCatalog};
use crate::error::{PanoramaError, Result};
use crate::store::FieldValue;

/// A membership test against one catalog dimension.
#[derive(Debug, Clone)]
pub struct Predicate<'a> {
    dimension: Dimension<'a>,
    accepted: BTreeSet<FieldValue>,
}

impl<'a> Predicate<'a> {
    /// Predicate for `selection` on `key`, or `None` when the selection is
    /// "all" and imposes nothing.
    pub fn for_selection(
        catalog: &'a FilterCatalog,
        key: &DimensionKey,
        selection: &Selection,
    ) -> Result<Option<Self>> {
        let dimension = catalog
            .dimension(key)
            .ok_or_else(|| PanoramaError::UnknownDimension(key.to_string()))?;
        Ok(selection.values().map(|values| Self {
            dimension,
            accepted: values.clone(),
        }))
    }

    /// Predicate matching exactly one value of a resolved dimension.
    pub fn equals(dimension: Dimension<'a>, value: FieldValue) -> Self {
        Self {
            dimension,
            accepted: BTreeSet::from([value]),
        }
    }

    /// Whether `row` satisfies the predicate.
    ///
    /// A questionnaire row matches when its cell decoded to at least one item
    /// with this label and an accepted value; rows whose cell did not decode
    /// have no items and never match.
    pub fn matches(&self, row: usize) -> bool {
        match self.dimension {
            Dimension::Plain(plain) => plain
                .values
                .get(row)
                .is_some_and(|v| self.accepted.contains(v)),
            Dimension::Question {
                questionnaire,
                label,
            } => questionnaire.row_matches(row, label, |v| self.accepted.contains(v)),
        }
    }
}

/// Build the row mask for a selection state: the conjunction of every
/// restricting filter. An unrestricted state selects every row.
pub fn build_mask(
    row_count: usize,
    catalog: &FilterCatalog,
    selections: &SelectionState,
) -> Result<RowMask> {
    let mut predicates = Vec::new();
    for filter in selections.active() {
        if let Some(p) = Predicate::for_selection(catalog, &filter.dimension, &filter.selection)? {
            predicates.push(p);
        }
    }

    let mut mask = RowMask::all(row_count);
    for predicate in &predicates {
        mask.retain(|row| predicate.matches(row));
    }

    debug!(
        filters = predicates.len(),
        selected = mask.count(),
        rows = row_count,
        "built row mask"
    );
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSpec;
    use crate::input::DataTable;
    use crate::store::RecordStore;

    fn fixture() -> (RecordStore, FilterCatalog) {
        let rows = vec![
            vec!["1", "F", "18-24", "[{'label': 'Q1', 'value': 'Yes'}]"],
            vec!["3", "M", "25-34", "[{'label': 'Q1', 'value': 'No'}]"],
            vec!["2", "F", "25-34", "[]"],
            vec!["1", "M", "18-24", "{broken"],
        ];
        let table = DataTable::new(
            vec!["weight".into(), "gender".into(), "age".into(), "habits".into()],
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b',',
        );
        let store = RecordStore::from_table(table, "weight").unwrap();
        let spec = CatalogSpec::empty("weight")
            .with_filter("Demo", "gender", "Gender")
            .with_filter("Demo", "age", "Age")
            .with_questionnaire("habits", "Habits");
        let catalog = FilterCatalog::build(&store, &spec).unwrap();
        (store, catalog)
    }

    fn mask(state: &SelectionState) -> Vec<bool> {
        let (store, catalog) = fixture();
        build_mask(store.len(), &catalog, state).unwrap().as_slice().to_vec()
    }

    #[test]
    fn test_unrestricted_selects_all() {
        assert_eq!(mask(&SelectionState::new()), vec![true; 4]);
        let state = SelectionState::new().with(DimensionKey::plain("gender"), Selection::all());
        assert_eq!(mask(&state), vec![true; 4]);
    }

    #[test]
    fn test_plain_membership() {
        let state = SelectionState::new()
            .with(DimensionKey::plain("gender"), Selection::from_choices(["F"]));
        assert_eq!(mask(&state), vec![true, false, true, false]);
    }

    #[test]
    fn test_conjunction() {
        let state = SelectionState::new()
            .with(DimensionKey::plain("gender"), Selection::from_choices(["F", "M"]))
            .with(DimensionKey::plain("age"), Selection::from_choices(["25-34"]));
        assert_eq!(mask(&state), vec![false, true, true, false]);
    }

    #[test]
    fn test_question_membership() {
        let q1 = DimensionKey::question("habits", "Q1");
        let yes = SelectionState::new().with(q1.clone(), Selection::from_choices(["Yes"]));
        assert_eq!(mask(&yes), vec![true, false, false, false]);

        let both = SelectionState::new().with(q1, Selection::from_choices(["Yes", "No"]));
        // Empty and malformed cells never match a questionnaire filter
        assert_eq!(mask(&both), vec![true, true, false, false]);
    }

    #[test]
    fn test_unknown_dimension_is_error() {
        let (store, catalog) = fixture();
        let state = SelectionState::new()
            .with(DimensionKey::plain("religion"), Selection::from_choices(["x"]));
        let err = build_mask(store.len(), &catalog, &state).unwrap_err();
        assert!(matches!(err, PanoramaError::UnknownDimension(d) if d == "religion"));
    }

    #[test]
    fn test_unknown_dimension_left_at_all_is_ignored() {
        let state = SelectionState::new().with(DimensionKey::plain("religion"), Selection::all());
        assert_eq!(mask(&state), vec![true; 4]);
    }
}
