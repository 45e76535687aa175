//! HTTP route handlers.

pub mod embed;
pub mod entries;
pub mod export;
pub mod forms;
pub mod health;
