//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::collections::HashMap;
use std::path::Path;

/// Builder for creating BookNerConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: BookNerConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: BookNerConfig::default(),
        }
    }

    /// Serve the domain model from a remote endpoint.
    pub fn with_remote_domain_model(mut self, endpoint: impl Into<String>) -> Self {
        self.config.extraction.domain.backend = remote(endpoint.into());
        self
    }

    /// Serve the general model from a remote endpoint.
    pub fn with_remote_general_model(mut self, endpoint: impl Into<String>) -> Self {
        self.config.extraction.general.backend = remote(endpoint.into());
        self
    }

    /// Use the built-in rule sets for both models.
    pub fn with_pattern_models(mut self) -> Self {
        self.config.extraction.domain.backend = ExtractorBackend::Pattern {
            flavour: PatternFlavour::Domain,
        };
        self.config.extraction.general.backend = ExtractorBackend::Pattern {
            flavour: PatternFlavour::General,
        };
        self
    }

    /// Set the request timeout for every remote model.
    pub fn with_model_timeout(mut self, secs: u64) -> Self {
        for extractor in [
            &mut self.config.extraction.domain,
            &mut self.config.extraction.general,
        ] {
            if let ExtractorBackend::Remote { timeout_secs, .. } = &mut extractor.backend {
                *timeout_secs = secs;
            }
        }
        self
    }

    /// Replace the restricted words.
    pub fn with_restricted_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extraction.merge.restricted_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the restricted-word context window (characters on each side).
    pub fn with_context_window(mut self, chars: usize) -> Self {
        self.config.extraction.merge.context_window = chars;
        self
    }

    /// Set how orphaned general-model authors are handled.
    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.config.extraction.merge.orphan_policy = policy;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Log to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<BookNerConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn remote(endpoint: String) -> ExtractorBackend {
    ExtractorBackend::Remote {
        endpoint,
        timeout_secs: 30,
        label_map: HashMap::new(),
    }
}
