//! Secondary breakdown dimensions and their results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::measure::Measure;
use crate::catalog::DimensionKey;
use crate::error::PanoramaError;
use crate::store::FieldValue;

/// The dimension a filtered population is split by.
///
/// Text form: `column`, `column:label`, or `column:*` for every question of
/// a questionnaire column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakdownDimension {
    /// Every value of a plain column observed in the filtered rows.
    Plain { column: String },
    /// Every catalogued value of one question.
    Question { column: String, label: String },
    /// Every catalogued (label, value) pair of a questionnaire column.
    Questionnaire { column: String },
}

impl From<DimensionKey> for BreakdownDimension {
    fn from(key: DimensionKey) -> Self {
        match key {
            DimensionKey::Plain { column } => BreakdownDimension::Plain { column },
            DimensionKey::Question { column, label } => {
                BreakdownDimension::Question { column, label }
            }
        }
    }
}

impl fmt::Display for BreakdownDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakdownDimension::Plain { column } => write!(f, "{}", column),
            BreakdownDimension::Question { column, label } => write!(f, "{}:{}", column, label),
            BreakdownDimension::Questionnaire { column } => write!(f, "{}:*", column),
        }
    }
}

impl FromStr for BreakdownDimension {
    type Err = PanoramaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once(':') {
            Some((column, "*")) if !column.trim().is_empty() => {
                Ok(BreakdownDimension::Questionnaire {
                    column: column.trim().to_string(),
                })
            }
            _ => s.parse::<DimensionKey>().map(Into::into),
        }
    }
}

/// One sub-group of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownGroup {
    /// Question label, for questionnaire breakdowns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: FieldValue,
    pub respondents: usize,
    pub weight: f64,
    /// Share of the filtered population's weight, in percent.
    pub share: Measure,
    /// Weighted metric average within the group.
    pub metric: Measure,
}

/// A filtered population split by a breakdown dimension.
///
/// Groups for questionnaire dimensions are listed for every catalogued
/// (label, value) pair, including pairs no filtered row matches, which carry
/// a zero share and an unavailable metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub dimension: BreakdownDimension,
    pub groups: Vec<BreakdownGroup>,
}

impl Breakdown {
    /// Find the group for a value (and label, for questionnaire breakdowns).
    pub fn group(&self, label: Option<&str>, value: &FieldValue) -> Option<&BreakdownGroup> {
        self.groups
            .iter()
            .find(|g| g.label.as_deref() == label && &g.value == value)
    }

    /// Sum of every group's share, ignoring unavailable ones.
    pub fn total_share(&self) -> f64 {
        self.groups.iter().filter_map(|g| g.share.value()).sum()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(
            "gender".parse::<BreakdownDimension>().unwrap(),
            BreakdownDimension::Plain {
                column: "gender".into()
            }
        );
        assert_eq!(
            "habits:Q1".parse::<BreakdownDimension>().unwrap(),
            BreakdownDimension::Question {
                column: "habits".into(),
                label: "Q1".into()
            }
        );
        assert_eq!(
            "habits:*".parse::<BreakdownDimension>().unwrap(),
            BreakdownDimension::Questionnaire {
                column: "habits".into()
            }
        );
        assert!(":*".parse::<BreakdownDimension>().is_err());
    }

    #[test]
    fn test_display_round_trips_text_form() {
        for text in ["gender", "habits:Q1", "habits:*"] {
            let dim: BreakdownDimension = text.parse().unwrap();
            assert_eq!(dim.to_string(), text);
        }
    }
}
