//! Repository implementations.

pub mod entry;
pub mod form;

pub use entry::EntryRepository;
pub use form::{FormRepository, NewField};
