//! Answer item decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::FieldValue;

/// One sub-question and the respondent's answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnswerItem {
    pub label: String,
    pub value: FieldValue,
}

impl AnswerItem {
    pub fn new(label: impl Into<String>, value: FieldValue) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Decode a raw questionnaire cell from `column`.
///
/// Absent, blank, and structurally invalid cells decode to no items. List
/// entries that are not objects carrying both `label` and `value` are
/// skipped individually. Bare string entries are answers to a synthetic
/// question labelled with the column name.
pub fn parse_answers(raw: Option<&str>, column: &str) -> Vec<AnswerItem> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let normalized = raw.replace('\'', "\"");
    let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(&normalized) else {
        return Vec::new();
    };

    let mut items: Vec<AnswerItem> = entries
        .iter()
        .filter_map(|entry| decode_entry(entry, column))
        .collect();
    items.sort();
    items.dedup();
    items
}

fn decode_entry(entry: &Value, column: &str) -> Option<AnswerItem> {
    match entry {
        Value::Object(map) => {
            let label = scalar_label(map.get("label")?)?;
            let value = map.get("value")?;
            if value.is_array() || value.is_object() {
                return None;
            }
            Some(AnswerItem::new(label, FieldValue::from_json(value)))
        }
        Value::String(s) => Some(AnswerItem::new(column, FieldValue::from_cell(s))),
        _ => None,
    }
}

fn scalar_label(label: &Value) -> Option<String> {
    match label {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMN: &str = "habits";

    fn items(raw: &str) -> Vec<AnswerItem> {
        parse_answers(Some(raw), COLUMN)
    }

    #[test]
    fn test_single_quoted_objects() {
        let parsed = items("[{'label': 'Q1', 'value': 'Yes'}, {'label': 'Q2', 'value': 3}]");
        assert_eq!(
            parsed,
            vec![
                AnswerItem::new("Q1", FieldValue::Text("Yes".into())),
                AnswerItem::new("Q2", FieldValue::Number(3.0)),
            ]
        );
    }

    #[test]
    fn test_blank_and_absent_cells() {
        assert!(parse_answers(None, COLUMN).is_empty());
        assert!(items("").is_empty());
        assert!(items("   ").is_empty());
        assert!(items("[]").is_empty());
    }

    #[test]
    fn test_malformed_cells() {
        assert!(items("not json").is_empty());
        assert!(items("[{'label': 'Q1', 'value': 'Yes'}").is_empty());
        assert!(items("{'label': 'Q1', 'value': 'Yes'}").is_empty());
        assert!(items("[{'label': 'Q1', 'value': 'it's'}]").is_empty());
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let parsed = items("[{'label': 'Q1'}, {'value': 'x'}, 7, {'label': 'Q2', 'value': 'No'}, {'label': 'Q3', 'value': ['a']}]");
        assert_eq!(parsed, vec![AnswerItem::new("Q2", FieldValue::Text("No".into()))]);
    }

    #[test]
    fn test_bare_strings_use_column_label() {
        let parsed = items("['Running', 'Yoga']");
        assert_eq!(
            parsed,
            vec![
                AnswerItem::new(COLUMN, FieldValue::Text("Running".into())),
                AnswerItem::new(COLUMN, FieldValue::Text("Yoga".into())),
            ]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let parsed = items("[{'label': 'Q1', 'value': 'Yes'}, {'label': 'Q1', 'value': 'Yes'}]");
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let raw = "[{'label': 'Q2', 'value': 'No'}, {'label': 'Q1', 'value': 'Yes'}]";
        assert_eq!(items(raw), items(raw));
    }
}
