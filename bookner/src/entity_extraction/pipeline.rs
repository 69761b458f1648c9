//! Extraction pipeline: normalize, run both models, merge.

use std::sync::Arc;
use std::time::Duration;

use super::config::{ExtractionConfig, ExtractorBackend, ExtractorConfig};
use super::{EntityMerger, PatternExtractor, RemoteExtractor, Span, SpanExtractor};
use crate::text::normalize_text;
use crate::{BookNerError, Result};

/// The two loaded models plus the merge policy.
///
/// Extractors are shared read-only; one pipeline serves every request.
#[derive(Debug, Clone)]
pub struct ExtractionPipeline {
    domain: Arc<dyn SpanExtractor>,
    general: Arc<dyn SpanExtractor>,
    merger: EntityMerger,
}

impl ExtractionPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Build a pipeline from configuration. Models are not warmed yet.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Self::builder()
            .domain_extractor(build_extractor(&config.domain)?)
            .general_extractor(build_extractor(&config.general)?)
            .merger(EntityMerger::from_config(&config.merge))
            .build()
    }

    /// Warm both models. Must succeed before the pipeline serves requests.
    pub async fn warm_up(&self) -> Result<()> {
        self.domain.warm_up().await?;
        self.general.warm_up().await?;
        Ok(())
    }

    /// Run the full pipeline over raw request text.
    ///
    /// Empty input fails before any model runs. Whitespace-only input has
    /// nothing to label and yields an empty list without calling the models.
    /// A failure in either model fails the whole call; no partial span list
    /// is ever returned.
    pub async fn predict(&self, raw_text: &str) -> Result<Vec<Span>> {
        let text = normalize_text(raw_text)?;
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let domain_spans = self.domain.extract(&text).await?;
        let general_spans = self.general.extract(&text).await?;

        Ok(self.merger.merge(&text, domain_spans, general_spans))
    }

    /// Name of the domain-model extractor.
    pub fn domain_extractor_name(&self) -> &str {
        self.domain.name()
    }

    /// Name of the general-model extractor.
    pub fn general_extractor_name(&self) -> &str {
        self.general.name()
    }

    /// The merge policy in use.
    pub fn merger(&self) -> &EntityMerger {
        &self.merger
    }
}

/// Instantiate the extractor an [`ExtractorConfig`] describes.
pub fn build_extractor(config: &ExtractorConfig) -> Result<Arc<dyn SpanExtractor>> {
    let extractor: Arc<dyn SpanExtractor> = match &config.backend {
        ExtractorBackend::Remote {
            endpoint,
            timeout_secs,
            label_map,
        } => Arc::new(
            RemoteExtractor::new(&config.name, endpoint, Duration::from_secs(*timeout_secs))?
                .with_label_map(label_map.clone()),
        ),
        ExtractorBackend::Pattern { flavour } => {
            Arc::new(PatternExtractor::new(&config.name, *flavour))
        }
    };
    Ok(extractor)
}

/// Builder for creating extraction pipelines
pub struct PipelineBuilder {
    domain: Option<Arc<dyn SpanExtractor>>,
    general: Option<Arc<dyn SpanExtractor>>,
    merger: EntityMerger,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            domain: None,
            general: None,
            merger: EntityMerger::default(),
        }
    }

    /// Set the domain-model extractor
    pub fn domain_extractor(mut self, extractor: Arc<dyn SpanExtractor>) -> Self {
        self.domain = Some(extractor);
        self
    }

    /// Set the general-model extractor
    pub fn general_extractor(mut self, extractor: Arc<dyn SpanExtractor>) -> Self {
        self.general = Some(extractor);
        self
    }

    /// Replace the default merge policy
    pub fn merger(mut self, merger: EntityMerger) -> Self {
        self.merger = merger;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<ExtractionPipeline> {
        let domain = self.domain.ok_or_else(|| {
            BookNerError::Configuration("Pipeline requires a domain extractor".to_string())
        })?;
        let general = self.general.ok_or_else(|| {
            BookNerError::Configuration("Pipeline requires a general extractor".to_string())
        })?;

        Ok(ExtractionPipeline {
            domain,
            general,
            merger: self.merger,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
