//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &BookNerConfig) -> Result<(), ConfigError> {
    validate_extractor_config(&config.extraction.domain)?;
    validate_extractor_config(&config.extraction.general)?;

    if config.extraction.domain.name == config.extraction.general.name {
        return Err(ConfigError::ValidationError(format!(
            "Domain and general extractors share the name '{}'",
            config.extraction.domain.name
        )));
    }

    validate_merge_config(&config.extraction.merge)?;

    Ok(())
}

/// Validate a single extractor configuration.
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    if config.name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Extractor name cannot be empty".to_string(),
        ));
    }

    if let ExtractorBackend::Remote {
        endpoint,
        timeout_secs,
        ..
    } = &config.backend
    {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "Extractor '{}' endpoint must be an http(s) URL, got '{}'",
                config.name, endpoint
            )));
        }
        if *timeout_secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "Extractor '{}' timeout must be greater than 0",
                config.name
            )));
        }
    }

    Ok(())
}

/// Validate merge policy configuration.
fn validate_merge_config(config: &MergeConfig) -> Result<(), ConfigError> {
    if config.restricted_words.iter().any(|w| w.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "Restricted words cannot be blank".to_string(),
        ));
    }

    Ok(())
}
