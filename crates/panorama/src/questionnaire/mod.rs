//! Decoding of questionnaire cells into answer items.
//!
//! A questionnaire cell holds several sub-question answers serialized as a
//! list of `{'label': ..., 'value': ...}` objects using single quotes.
//! Decoding is tolerant: anything that does not decode yields no items.

mod answer;

pub use answer::{AnswerItem, parse_answers};
