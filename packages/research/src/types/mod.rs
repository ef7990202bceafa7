//! Domain types for research runs.

pub mod config;
pub mod content;
pub mod query;
pub mod report;
pub mod source;
