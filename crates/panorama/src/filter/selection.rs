//! Per-session filter selections.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::DimensionKey;
use crate::store::FieldValue;

/// Choices a presentation layer may use to mean "no restriction".
pub const ALL_SENTINELS: &[&str] = &["all", "todos"];

fn is_all_sentinel(choice: &str) -> bool {
    ALL_SENTINELS.iter().any(|s| choice.trim().eq_ignore_ascii_case(s))
}

/// The chosen options of one dimension.
///
/// Either "all" (no restriction) or a non-empty set of values. An empty set
/// cannot be represented: it normalizes to "all". The JSON form is an array
/// of values where `[]` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FieldValue>", into = "Vec<FieldValue>")]
pub struct Selection {
    values: Option<BTreeSet<FieldValue>>,
}

impl Selection {
    /// No restriction.
    pub fn all() -> Self {
        Self { values: None }
    }

    /// Restrict to the given values; an empty set means "all".
    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        let set: BTreeSet<FieldValue> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Self::all()
        } else {
            Self { values: Some(set) }
        }
    }

    /// Interpret raw user choices. Any "all" sentinel among them, or no
    /// choices at all, yields "all".
    pub fn from_choices<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = BTreeSet::new();
        for choice in choices {
            let choice = choice.as_ref();
            if is_all_sentinel(choice) {
                return Self::all();
            }
            values.insert(FieldValue::from_cell(choice));
        }
        Self::any_of(values)
    }

    pub fn is_all(&self) -> bool {
        self.values.is_none()
    }

    /// The chosen values, or `None` for "all".
    pub fn values(&self) -> Option<&BTreeSet<FieldValue>> {
        self.values.as_ref()
    }

    /// Whether a value passes this selection.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        self.values.as_ref().is_none_or(|set| set.contains(value))
    }
}

/// The JSON form: a text value equal to a sentinel yields "all", as with
/// [`Selection::from_choices`].
impl From<Vec<FieldValue>> for Selection {
    fn from(values: Vec<FieldValue>) -> Self {
        let sentinel = values
            .iter()
            .any(|v| matches!(v, FieldValue::Text(t) if is_all_sentinel(t)));
        if sentinel {
            Self::all()
        } else {
            Self::any_of(values)
        }
    }
}

impl From<Selection> for Vec<FieldValue> {
    fn from(selection: Selection) -> Self {
        selection.values.map(|s| s.into_iter().collect()).unwrap_or_default()
    }
}

/// The selection for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub dimension: DimensionKey,
    pub selection: Selection,
}

/// Every filter a session has set. Owned by the caller and passed into each
/// evaluation; the core never keeps it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    filters: Vec<FilterSelection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection of a dimension, replacing any earlier one.
    pub fn set(&mut self, dimension: DimensionKey, selection: Selection) {
        self.filters.retain(|f| f.dimension != dimension);
        if !selection.is_all() {
            self.filters.push(FilterSelection {
                dimension,
                selection,
            });
        }
    }

    /// Builder form of [`SelectionState::set`].
    pub fn with(mut self, dimension: DimensionKey, selection: Selection) -> Self {
        self.set(dimension, selection);
        self
    }

    /// The selection of a dimension; unset dimensions are "all".
    pub fn get(&self, dimension: &DimensionKey) -> Selection {
        self.filters
            .iter()
            .find(|f| &f.dimension == dimension)
            .map(|f| f.selection.clone())
            .unwrap_or_default()
    }

    /// Filters that actually restrict rows.
    pub fn active(&self) -> impl Iterator<Item = &FilterSelection> {
        self.filters.iter().filter(|f| !f.selection.is_all())
    }

    /// True when no filter restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.active().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_all() {
        assert!(Selection::any_of(Vec::<FieldValue>::new()).is_all());
        assert!(Selection::from_choices(Vec::<&str>::new()).is_all());
        assert!(Selection::default().is_all());
    }

    #[test]
    fn test_sentinel_wins() {
        assert!(Selection::from_choices(["F", "Todos"]).is_all());
        assert!(Selection::from_choices(["ALL"]).is_all());
        assert!(!Selection::from_choices(["F"]).is_all());
    }

    #[test]
    fn test_accepts() {
        let sel = Selection::from_choices(["F", "1"]);
        assert!(sel.accepts(&FieldValue::text("F")));
        assert!(sel.accepts(&FieldValue::number(1.0)));
        assert!(!sel.accepts(&FieldValue::text("M")));
        assert!(Selection::all().accepts(&FieldValue::Missing));
    }

    #[test]
    fn test_json_empty_array_is_all() {
        let sel: Selection = serde_json::from_str("[]").unwrap();
        assert!(sel.is_all());
        let sel: Selection = serde_json::from_str(r#"["F", 2]"#).unwrap();
        assert_eq!(serde_json::to_string(&sel).unwrap(), r#"[2.0,"F"]"#);
    }

    #[test]
    fn test_json_sentinel_is_all() {
        let sel: Selection = serde_json::from_str(r#"["Todos"]"#).unwrap();
        assert!(sel.is_all());
        let sel: Selection = serde_json::from_str(r#"["F", "all"]"#).unwrap();
        assert!(sel.is_all());
        let sel: Selection = serde_json::from_str(r#"["F"]"#).unwrap();
        assert!(!sel.is_all());
    }

    #[test]
    fn test_state_set_replaces_and_clears() {
        let gender = DimensionKey::plain("gender");
        let mut state = SelectionState::new()
            .with(gender.clone(), Selection::from_choices(["F"]))
            .with(gender.clone(), Selection::from_choices(["M"]));

        assert_eq!(state.active().count(), 1);
        assert_eq!(state.get(&gender), Selection::from_choices(["M"]));

        state.set(gender.clone(), Selection::all());
        assert!(state.is_unrestricted());
        assert!(state.get(&gender).is_all());
    }

    #[test]
    fn test_state_json_form() {
        let state = SelectionState::new()
            .with(DimensionKey::question("habits", "Q1"), Selection::from_choices(["Yes"]));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "dimension": {"kind": "question", "column": "habits", "label": "Q1"},
                "selection": ["Yes"]
            }])
        );
    }
}
