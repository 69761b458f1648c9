//! Data Transfer Objects for the API

use bookner::entity_extraction::Span;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to extract entities from text
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PredictRequest {
    /// Raw text; whitespace is normalized before extraction
    #[serde(default)]
    pub text: Option<String>,
}

/// A labeled span of the normalized request text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SpanDto {
    /// The covered text
    pub text: String,

    /// Title, Edition, Volume, ISBN, Authors, or another model label
    pub label: String,

    /// Start offset in characters
    pub start: usize,

    /// End offset in characters (exclusive)
    pub end: usize,
}

impl From<Span> for SpanDto {
    fn from(span: Span) -> Self {
        Self {
            text: span.text,
            label: span.label.into(),
            start: span.start,
            end: span.end,
        }
    }
}

/// Merged extraction result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictResponse {
    /// Spans in merge order
    pub entities: Vec<SpanDto>,
}

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// Health and capability report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub extractors: ExtractorsDto,
    pub merge: MergeSettingsDto,
}

/// Names of the loaded extractors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractorsDto {
    pub domain: String,
    pub general: String,
}

/// Active merge policy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MergeSettingsDto {
    pub restricted_words: Vec<String>,
    pub context_window: usize,
    pub orphan_policy: String,
}
