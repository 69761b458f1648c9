//! Traits for entity extraction functionality.

use super::Span;
use crate::Result;
use async_trait::async_trait;

/// A loaded NER model that turns normalized text into labeled spans.
#[async_trait]
pub trait SpanExtractor: Send + Sync + std::fmt::Debug {
    /// Extract spans from already-normalized text.
    ///
    /// # Arguments
    /// * `text` - Normalized text; returned offsets are character positions into it
    ///
    /// # Returns
    /// Spans in the order the model produced them
    async fn extract(&self, text: &str) -> Result<Vec<Span>>;

    /// Get the name of this extractor for identification purposes.
    fn name(&self) -> &str;

    /// Prepare the model before the first request is served.
    ///
    /// Called once during startup. A failure here prevents the service from
    /// accepting requests.
    async fn warm_up(&self) -> Result<()> {
        Ok(())
    }
}
