//! Weighted shares, weighted metric averages and breakdowns.

mod aggregator;
mod breakdown;
mod measure;

pub use aggregator::Aggregator;
pub use breakdown::{Breakdown, BreakdownDimension, BreakdownGroup};
pub use measure::Measure;
