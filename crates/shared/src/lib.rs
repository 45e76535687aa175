//! Shared utilities and common types for the FormSmith backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (hashing, token generation)
//! - HTML escaping for rendered output
//! - Plain-text sanitization for untrusted submission data
//! - Common validation logic

pub mod crypto;
pub mod escape;
pub mod sanitize;
pub mod validation;
