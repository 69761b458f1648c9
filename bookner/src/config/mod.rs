//! Configuration system for bookner.
//!
//! This module provides a flexible configuration system that supports loading
//! configuration from multiple sources (files, environment variables, etc.)
//! with proper validation and defaults.

mod builder;
mod loader;
mod models;
pub mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "bookner.toml",
    "bookner.yaml",
    "bookner.yml",
    "bookner.json",
    ".bookner/config.toml",
    ".bookner/config.yaml",
    ".bookner/config.yml",
    ".bookner/config.json",
];

/// Environment variable prefix for bookner configuration.
///
/// Nested keys are separated by a double underscore, e.g.
/// `BOOKNER_EXTRACTION__MERGE__CONTEXT_WINDOW=30`.
pub const ENV_PREFIX: &str = "BOOKNER_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
