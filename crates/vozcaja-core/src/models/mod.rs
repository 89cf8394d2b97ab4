//! Data models: movement records, summaries and configuration.

pub mod config;
pub mod summary;
pub mod transaction;
