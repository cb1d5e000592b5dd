//! Filter selections and row masks.

mod mask;
mod predicate;
mod selection;

pub use mask::RowMask;
pub use predicate::{Predicate, build_mask};
pub use selection::{ALL_SENTINELS, FilterSelection, Selection, SelectionState};
