//! Possibly-undefined aggregate values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An aggregate that is undefined when its weight denominator is zero.
///
/// Values are kept at full precision; rounding is left to presentation.
/// The JSON form is a number, or `null` when unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Measure {
    Available(f64),
    Unavailable,
}

impl Measure {
    /// `numerator / denominator`, unavailable for a zero, negative or
    /// non-finite denominator.
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 && denominator.is_finite() {
            Self::from(Some(numerator / denominator))
        } else {
            Measure::Unavailable
        }
    }

    /// A ratio expressed as a percentage.
    pub fn percentage(part: f64, whole: f64) -> Self {
        Self::ratio(part, whole).map(|v| v * 100.0)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Measure::Available(v) => Some(v),
            Measure::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Measure::Available(_))
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        Self::from(self.value().map(f))
    }

    /// Rounded to the nearest integer, for display.
    pub fn rounded(self) -> Self {
        self.map(f64::round)
    }
}

impl From<Option<f64>> for Measure {
    fn from(value: Option<f64>) -> Self {
        match value {
            // `+ 0.0` folds -0.0 into 0.0
            Some(v) if v.is_finite() => Measure::Available(v + 0.0),
            _ => Measure::Unavailable,
        }
    }
}

impl From<Measure> for Option<f64> {
    fn from(measure: Measure) -> Self {
        measure.value()
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Available(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Measure::Unavailable => write!(f, "unavailable"),
        }
    }
}
