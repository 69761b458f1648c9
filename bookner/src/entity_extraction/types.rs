//! Span types produced by extractors and returned to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Labels a span can carry.
///
/// The domain model emits `Title`, `Edition`, `Volume`, `ISBN` and `Authors`;
/// the general model emits `PERSON` among others. Anything else is kept
/// verbatim in [`SpanLabel::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpanLabel {
    /// Book title
    Title,
    /// Edition statement (e.g., "3rd Edition")
    Edition,
    /// Volume statement (e.g., "Volume 2")
    Volume,
    /// ISBN-10 or ISBN-13
    Isbn,
    /// Author name
    Authors,
    /// Person name from a general-purpose model
    Person,
    /// Any other label, kept as produced by the model
    Other(String),
}

impl SpanLabel {
    /// Get the wire representation of the label.
    pub fn as_str(&self) -> &str {
        match self {
            SpanLabel::Title => "Title",
            SpanLabel::Edition => "Edition",
            SpanLabel::Volume => "Volume",
            SpanLabel::Isbn => "ISBN",
            SpanLabel::Authors => "Authors",
            SpanLabel::Person => "PERSON",
            SpanLabel::Other(name) => name,
        }
    }
}

impl From<&str> for SpanLabel {
    fn from(label: &str) -> Self {
        match label {
            "Title" => SpanLabel::Title,
            "Edition" => SpanLabel::Edition,
            "Volume" => SpanLabel::Volume,
            "ISBN" => SpanLabel::Isbn,
            "Authors" => SpanLabel::Authors,
            "PERSON" => SpanLabel::Person,
            other => SpanLabel::Other(other.to_string()),
        }
    }
}

impl From<String> for SpanLabel {
    fn from(label: String) -> Self {
        match SpanLabel::from(label.as_str()) {
            SpanLabel::Other(_) => SpanLabel::Other(label),
            known => known,
        }
    }
}

impl From<SpanLabel> for String {
    fn from(label: SpanLabel) -> Self {
        match label {
            SpanLabel::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SpanLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled substring of the normalized text.
///
/// `start` and `end` are character offsets into the normalized text, `end`
/// exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// The covered text
    pub text: String,
    /// Label assigned by the producing model
    pub label: SpanLabel,
    /// Start offset (characters)
    pub start: usize,
    /// End offset (characters, exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, label: SpanLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }

    /// The same span carrying a different label.
    pub fn relabel(self, label: SpanLabel) -> Self {
        Self { label, ..self }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ({}..{})", self.text, self.label, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_wire_format() {
        let span = Span::new("123-456", SpanLabel::Isbn, 4, 11);
        let json = serde_json::to_value(&span).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "123-456", "label": "ISBN", "start": 4, "end": 11})
        );

        let parsed: Span = serde_json::from_value(serde_json::json!({
            "text": "Acme Press", "label": "ORG", "start": 0, "end": 10
        }))
        .unwrap();
        assert_eq!(parsed.label, SpanLabel::Other("ORG".to_string()));
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(SpanLabel::from("PERSON"), SpanLabel::Person);
        assert_eq!(
            SpanLabel::from("Person"),
            SpanLabel::Other("Person".to_string())
        );
        assert_eq!(
            SpanLabel::from("authors"),
            SpanLabel::Other("authors".to_string())
        );
    }
}
