//! Extractor backed by a model served over HTTP.
//!
//! The model server receives `POST {"text": "..."}` and answers with
//! `{"entities": [{"text", "label", "start", "end"}, ...]}`, offsets being
//! character positions into the submitted text. This is the same shape
//! bookner itself returns, so one bookner instance can front another.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::{Span, SpanExtractor, SpanLabel};
use crate::{BookNerError, Result};

/// Sentence sent to the model during warm-up.
const WARM_UP_TEXT: &str = "Jane Doe. An Introduction to Algorithms, 2nd Edition. ISBN 978-0-262-03384-8";

#[derive(Debug, Serialize)]
struct ModelRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModelResponse {
    entities: Vec<Span>,
}

/// Span extractor calling a remote model endpoint.
#[derive(Debug)]
pub struct RemoteExtractor {
    name: String,
    endpoint: String,
    label_map: HashMap<String, String>,
    client: reqwest::Client,
}

impl RemoteExtractor {
    /// Create a new remote extractor.
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let name = name.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bookner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                BookNerError::Configuration(format!(
                    "Failed to create HTTP client for extractor '{}': {}",
                    name, e
                ))
            })?;

        Ok(Self {
            name,
            endpoint: endpoint.into(),
            label_map: HashMap::new(),
            client,
        })
    }

    /// Rename model labels before they reach the merger.
    pub fn with_label_map(mut self, label_map: HashMap<String, String>) -> Self {
        self.label_map = label_map;
        self
    }

    fn map_label(&self, label: SpanLabel) -> SpanLabel {
        match self.label_map.get(label.as_str()) {
            Some(mapped) => SpanLabel::from(mapped.as_str()),
            None => label,
        }
    }

    async fn call_model(&self, text: &str) -> Result<Vec<Span>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ModelRequest { text })
            .send()
            .await
            .map_err(|e| BookNerError::extraction(&self.name, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookNerError::extraction(
                &self.name,
                format!(
                    "HTTP error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        let body: ModelResponse = response.json().await.map_err(|e| {
            BookNerError::extraction(&self.name, format!("Malformed model response: {}", e))
        })?;

        Ok(body
            .entities
            .into_iter()
            .map(|span| {
                let label = self.map_label(span.label.clone());
                span.relabel(label)
            })
            .collect())
    }
}

#[async_trait]
impl SpanExtractor for RemoteExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<Span>> {
        let spans = self.call_model(text).await?;
        debug!(extractor = %self.name, spans = spans.len(), "Remote extraction complete");
        Ok(spans)
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn warm_up(&self) -> Result<()> {
        debug!(extractor = %self.name, endpoint = %self.endpoint, "Warming up remote model");
        self.call_model(WARM_UP_TEXT).await.map(|_| ())
    }
}
