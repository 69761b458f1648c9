//! Application state management

use bookner::entity_extraction::ExtractionPipeline;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Loaded extractors and merge policy
    pub pipeline: ExtractionPipeline,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state.
    ///
    /// The pipeline is expected to be warmed already.
    pub fn new(pipeline: ExtractionPipeline, config: ServerConfig) -> Self {
        Self { pipeline, config }
    }
}
