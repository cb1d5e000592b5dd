//! Identifiers for selectable dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PanoramaError;

/// Identifies one selectable filter dimension.
///
/// Text form: `column` for a plain dimension, `column:label` for a question
/// inside a questionnaire column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DimensionKey {
    Plain { column: String },
    Question { column: String, label: String },
}

impl DimensionKey {
    pub fn plain(column: impl Into<String>) -> Self {
        DimensionKey::Plain {
            column: column.into(),
        }
    }

    pub fn question(column: impl Into<String>, label: impl Into<String>) -> Self {
        DimensionKey::Question {
            column: column.into(),
            label: label.into(),
        }
    }

    /// The dataset column this dimension reads.
    pub fn column(&self) -> &str {
        match self {
            DimensionKey::Plain { column } | DimensionKey::Question { column, .. } => column,
        }
    }
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionKey::Plain { column } => write!(f, "{}", column),
            DimensionKey::Question { column, label } => write!(f, "{}:{}", column, label),
        }
    }
}

impl FromStr for DimensionKey {
    type Err = PanoramaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some((column, label)) if !column.trim().is_empty() && !label.trim().is_empty() => {
                Ok(DimensionKey::question(column.trim(), label.trim()))
            }
            Some(_) => Err(PanoramaError::InvalidSelection(format!(
                "expected 'column:label', got '{}'",
                s
            ))),
            None if s.is_empty() => Err(PanoramaError::InvalidSelection(
                "empty dimension name".to_string(),
            )),
            None => Ok(DimensionKey::plain(s)),
        }
    }
}
