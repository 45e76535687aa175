//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod entry;
pub mod field;
pub mod form;

pub use entry::EntryEntity;
pub use field::FieldEntity;
pub use form::{FormEntity, FormSummaryEntity};
