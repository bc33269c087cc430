//! Configuration module for scrape runs
//!
//! This module provides the `ScrapeConfig` struct and its type-safe builder
//! with validation and defaults from `utils::constants`.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{ScrapeConfigBuilder, WithKeyword};
pub use types::{ConfigError, FailedCardPolicy, ScrapeConfig};
