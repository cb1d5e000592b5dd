//! In-memory respondent store and typed cell values.

mod records;
mod value;

pub use records::RecordStore;
pub use value::FieldValue;
