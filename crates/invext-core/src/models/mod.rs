//! Data models: configuration and the typed invoice summary.

pub mod config;
pub mod invoice;
