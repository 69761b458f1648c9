//! Configuration for entity extraction functionality.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Restricted words used when none are configured.
pub const DEFAULT_RESTRICTED_WORDS: &[&str] = &["Copyright", "Published"];

/// Characters inspected on each side of a person span.
pub const DEFAULT_CONTEXT_WINDOW: usize = 20;

/// Configuration for entity extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Domain-specific model (titles, editions, volumes, ISBNs, authors)
    pub domain: ExtractorConfig,
    /// General-purpose model (person names)
    pub general: ExtractorConfig,
    /// Merge policy settings
    pub merge: MergeConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            domain: ExtractorConfig {
                name: "domain".to_string(),
                backend: ExtractorBackend::Pattern {
                    flavour: PatternFlavour::Domain,
                },
            },
            general: ExtractorConfig {
                name: "general".to_string(),
                backend: ExtractorBackend::Pattern {
                    flavour: PatternFlavour::General,
                },
            },
            merge: MergeConfig::default(),
        }
    }
}

/// Configuration for a specific extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Name of the extractor, used in logs and error messages
    pub name: String,
    /// Where the model lives
    pub backend: ExtractorBackend,
}

/// Types of extractor backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractorBackend {
    /// Model served over HTTP
    Remote {
        /// URL accepting `POST {"text": ...}` and answering `{"entities": [...]}`
        endpoint: String,
        /// Per-request timeout in seconds
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
        /// Renames applied to model labels (e.g. `PER` -> `PERSON`)
        #[serde(default)]
        label_map: HashMap<String, String>,
    },
    /// Built-in regular expression rules
    Pattern {
        /// Which rule set to run
        flavour: PatternFlavour,
    },
}

fn default_timeout_secs() -> u64 {
    30
}

/// Rule sets available to the pattern backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFlavour {
    /// ISBN, edition and volume statements
    Domain,
    /// Capitalized person-name candidates
    General,
}

/// What to do with general-model authors when the domain model found none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Discard them; they are only ever spliced after the primary author
    #[default]
    Drop,
    /// Append them after all domain spans
    Append,
}

/// Merge policy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Words whose presence near a person span marks it as a false positive
    pub restricted_words: Vec<String>,
    /// Characters inspected on each side of a person span
    pub context_window: usize,
    /// Handling of general-model authors with no primary author to follow
    pub orphan_policy: OrphanPolicy,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            restricted_words: DEFAULT_RESTRICTED_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            context_window: DEFAULT_CONTEXT_WINDOW,
            orphan_policy: OrphanPolicy::Drop,
        }
    }
}
