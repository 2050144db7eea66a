//! Data models: the extracted bill record and pipeline configuration.

pub mod config;
pub mod record;
