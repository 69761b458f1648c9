//! # Bookner
//!
//! Bibliographic entity extraction for book front matter, catalogue records
//! and citation blurbs. Two named-entity models run over the same normalized
//! text: a domain model that knows about titles, editions, volumes, ISBNs and
//! authors, and a general-purpose model that finds person names. Their output
//! is merged into a single ordered list of labeled spans.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bookner::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConfigBuilder::new().build()?;
//!     let pipeline = bookner::init(&config).await?;
//!
//!     let spans = pipeline
//!         .predict("John Smith. Data Structures, 3rd Edition. ISBN 978-0-13-110362-7")
//!         .await?;
//!     for span in spans {
//!         println!("{} [{}] {}..{}", span.text, span.label, span.start, span.end);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`text`]: whitespace normalization and character-indexed windows
//! - [`entity_extraction`]: span model, extractor backends, the merge policy
//!   and the pipeline tying them together
//! - [`config`]: figment-backed configuration loading and validation
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod entity_extraction;
pub mod logging;
pub mod text;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::init;

    pub use crate::config::{
        BookNerConfig, ConfigBuilder, ConfigLoader, ExtractionConfig, LogFormat, LogLevel,
        LoggingConfig,
    };

    pub use crate::entity_extraction::{
        EntityMerger, ExtractionPipeline, ExtractorBackend, ExtractorConfig, MergeConfig,
        OrphanPolicy, PatternExtractor, PatternFlavour, RemoteExtractor, Span, SpanExtractor,
        SpanLabel,
    };

    pub use crate::text::normalize_text;

    pub use crate::{BookNerError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for bookner operations
#[derive(Debug, thiserror::Error)]
pub enum BookNerError {
    /// The submitted text was empty or missing
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An extractor failed while producing spans
    #[error("Extractor '{extractor}' failed: {message}")]
    Extraction {
        /// Name of the failing extractor
        extractor: String,
        /// Underlying failure description
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),
}

impl BookNerError {
    /// Shorthand for an extraction failure attributed to `extractor`.
    pub fn extraction(extractor: impl Into<String>, message: impl Into<String>) -> Self {
        BookNerError::Extraction {
            extractor: extractor.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for BookNerError {
    fn from(err: config::ConfigError) -> Self {
        BookNerError::Configuration(err.to_string())
    }
}

/// Result type for bookner operations
pub type Result<T> = std::result::Result<T, BookNerError>;

/// Build the extraction pipeline described by `config` and warm both models.
///
/// Logging is not initialized here; binaries decide how they want their
/// subscriber set up (see [`logging::init`]).
pub async fn init(config: &config::BookNerConfig) -> Result<entity_extraction::ExtractionPipeline> {
    let pipeline = entity_extraction::ExtractionPipeline::from_config(&config.extraction)?;
    pipeline.warm_up().await?;
    tracing::info!(
        domain = pipeline.domain_extractor_name(),
        general = pipeline.general_extractor_name(),
        "Extraction pipeline ready"
    );
    Ok(pipeline)
}
