//! Typed scalar values used for filtering and option lists.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::input::DataTable;

/// A scalar categorical value from a plain column or an answer item.
///
/// Ordering is total: `Missing < Number < Text`, numbers by value and text
/// lexicographically. Option lists are sorted with this order so repeated
/// runs over the same data present options identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Missing,
}

impl FieldValue {
    /// Interpret a raw cell: null markers are `Missing`, finite floats are
    /// `Number`, everything else is trimmed `Text`.
    pub fn from_cell(raw: &str) -> Self {
        if DataTable::is_null_value(raw) {
            return FieldValue::Missing;
        }
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(normalize(n)),
            _ => FieldValue::Text(trimmed.to_string()),
        }
    }

    /// Build a numeric value; NaN is treated as missing.
    pub fn number(n: f64) -> Self {
        if n.is_nan() {
            FieldValue::Missing
        } else {
            FieldValue::Number(normalize(n))
        }
    }

    /// Build a text value, interpreted like a raw cell.
    pub fn text(s: impl AsRef<str>) -> Self {
        Self::from_cell(s.as_ref())
    }

    /// Convert a decoded JSON scalar.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Missing,
            Value::Bool(b) => FieldValue::Text(b.to_string()),
            Value::Number(n) => n.as_f64().map(Self::number).unwrap_or(FieldValue::Missing),
            Value::String(s) => Self::from_cell(s),
            other => FieldValue::Text(other.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
        }
    }
}

fn normalize(n: f64) -> f64 {
    if n == 0.0 { 0.0 } else { n }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                if a == b {
                    Ordering::Equal
                } else {
                    a.total_cmp(b)
                }
            }
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            FieldValue::Number(n) => normalize(*n).to_bits().hash(state),
            FieldValue::Text(s) => s.hash(state),
            FieldValue::Missing => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{:.0}", n),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Missing => write!(f, "N/A"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::from_cell(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_from_cell() {
        assert_eq!(FieldValue::from_cell(" F "), FieldValue::Text("F".into()));
        assert_eq!(FieldValue::from_cell("1.0"), FieldValue::Number(1.0));
        assert_eq!(FieldValue::from_cell("1"), FieldValue::from_cell("1.0"));
        assert!(FieldValue::from_cell("NA").is_missing());
        assert!(FieldValue::from_cell("   ").is_missing());
        assert_eq!(FieldValue::from_cell("inf"), FieldValue::Text("inf".into()));
    }

    #[test]
    fn test_negative_zero_equals_zero() {
        assert_eq!(FieldValue::number(-0.0), FieldValue::number(0.0));
        assert_eq!(FieldValue::Number(-0.0), FieldValue::Number(0.0));
    }

    #[test]
    fn test_total_order() {
        let set: BTreeSet<FieldValue> = ["b", "10", "a", "", "2"]
            .into_iter()
            .map(FieldValue::from_cell)
            .collect();
        let ordered: Vec<String> = set.iter().map(|v| v.to_string()).collect();
        assert_eq!(ordered, vec!["N/A", "2", "10", "a", "b"]);
    }

    #[test]
    fn test_from_json() {
        use serde_json::json;
        assert_eq!(FieldValue::from_json(&json!("Yes")), FieldValue::Text("Yes".into()));
        assert_eq!(FieldValue::from_json(&json!(3)), FieldValue::Number(3.0));
        assert_eq!(FieldValue::from_json(&json!("3")), FieldValue::Number(3.0));
        assert!(FieldValue::from_json(&json!(null)).is_missing());
        assert_eq!(FieldValue::from_json(&json!(true)), FieldValue::Text("true".into()));
    }

    #[test]
    fn test_json_form() {
        let values = vec![
            FieldValue::Number(2.5),
            FieldValue::Text("F".into()),
            FieldValue::Missing,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[2.5,"F",null]"#);
        let back: Vec<FieldValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
