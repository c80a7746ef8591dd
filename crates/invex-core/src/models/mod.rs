//! Data models for records and run configuration.

pub mod config;
pub mod record;
