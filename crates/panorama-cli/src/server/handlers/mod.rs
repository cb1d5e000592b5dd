//! API request handlers.

mod catalog;
mod data;
mod evaluate;

pub use catalog::*;
pub use data::*;
pub use evaluate::*;
