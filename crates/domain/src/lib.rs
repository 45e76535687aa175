//! Domain layer for the FormSmith backend.
//!
//! This crate contains:
//! - Domain models (Form, FieldDef, Entry) and their wire contracts
//! - Pure services: the builder view-model reducers, the HTML renderer,
//!   the submission collector/sanitizer, and export helpers

pub mod models;
pub mod services;
