//! Data models for extracted boletos and configuration.

pub mod config;
pub mod record;
