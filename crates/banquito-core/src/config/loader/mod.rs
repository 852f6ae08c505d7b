//! Configuration loading and management
//!
//! This module provides the configuration loading system with support for multiple sources:
//! - Configuration files (JSON, TOML, YAML)
//! - Environment variables (`BANQUITO_*`, plus `.env`)
//! - Command line arguments
//! - Default configuration
//!
//! Later sources override earlier ones; only values a source actually sets
//! are applied.

mod builder;
mod loading;
mod types;

#[cfg(test)]
mod tests;

// Re-export public types
pub use builder::ConfigLoader;
pub use types::ConfigSource;
