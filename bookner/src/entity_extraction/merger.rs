//! Merging of domain-model and general-model spans.
//!
//! The domain model is authoritative for everything it labels, but it only
//! contributes one author: the first `Authors` span it produces (the primary
//! author). Further authors come from the general model's `PERSON` spans,
//! minus the primary author itself and minus names sitting next to a
//! restricted word such as "Copyright". Those extra authors are spliced in
//! directly after the primary author.

use super::config::{MergeConfig, OrphanPolicy};
use super::{Span, SpanLabel};
use crate::text::char_window;

/// Combines the two extractors' outputs into one ordered span list.
#[derive(Debug, Clone)]
pub struct EntityMerger {
    /// Restricted words, pre-lowercased
    restricted_words: Vec<String>,
    context_window: usize,
    orphan_policy: OrphanPolicy,
}

impl EntityMerger {
    /// Create a merger with the default policy.
    pub fn new() -> Self {
        Self::from_config(&MergeConfig::default())
    }

    /// Create a merger from configuration.
    pub fn from_config(config: &MergeConfig) -> Self {
        Self {
            restricted_words: config
                .restricted_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            context_window: config.context_window,
            orphan_policy: config.orphan_policy,
        }
    }

    /// Restricted words this merger filters on (lower-cased).
    pub fn restricted_words(&self) -> &[String] {
        &self.restricted_words
    }

    /// Characters inspected on each side of a person span.
    pub fn context_window(&self) -> usize {
        self.context_window
    }

    /// Orphan handling policy.
    pub fn orphan_policy(&self) -> OrphanPolicy {
        self.orphan_policy
    }

    /// Merge `domain` and `general` spans found in `text`.
    ///
    /// `text` must be the normalized text both extractors ran over.
    pub fn merge(&self, text: &str, domain: Vec<Span>, general: Vec<Span>) -> Vec<Span> {
        let domain_count = domain.len();
        let general_count = general.len();

        let (mut merged, primary_author) = Self::select_domain_spans(domain);
        let additional = self.select_additional_authors(text, general, primary_author.as_deref());
        let additional_count = additional.len();

        match merged.iter().position(|s| s.label == SpanLabel::Authors) {
            Some(idx) => {
                merged.splice(idx + 1..idx + 1, additional);
            }
            None => match self.orphan_policy {
                OrphanPolicy::Drop => {
                    if additional_count > 0 {
                        tracing::debug!(
                            dropped = additional_count,
                            "No primary author found, dropping general-model authors"
                        );
                    }
                }
                OrphanPolicy::Append => merged.extend(additional),
            },
        }

        tracing::debug!(
            domain_spans = domain_count,
            general_spans = general_count,
            additional_authors = additional_count,
            merged_spans = merged.len(),
            "Merged extractor output"
        );

        merged
    }

    /// Keep every domain span except `Authors` spans after the first one.
    /// Returns the kept spans and the primary author's text.
    fn select_domain_spans(domain: Vec<Span>) -> (Vec<Span>, Option<String>) {
        let mut primary_author: Option<String> = None;
        let mut kept = Vec::with_capacity(domain.len());

        for span in domain {
            if span.label == SpanLabel::Authors {
                if primary_author.is_some() {
                    continue;
                }
                primary_author = Some(span.text.clone());
            }
            kept.push(span);
        }

        (kept, primary_author)
    }

    /// Person spans that are neither the primary author nor near a restricted
    /// word, relabeled as `Authors`.
    fn select_additional_authors(
        &self,
        text: &str,
        general: Vec<Span>,
        primary_author: Option<&str>,
    ) -> Vec<Span> {
        general
            .into_iter()
            .filter(|span| span.label == SpanLabel::Person)
            .filter(|span| primary_author != Some(span.text.as_str()))
            .filter(|span| {
                let near = self.is_near_restricted_word(text, span);
                if near {
                    tracing::trace!(person = %span.text, "Skipping person near restricted word");
                }
                !near
            })
            .map(|span| span.relabel(SpanLabel::Authors))
            .collect()
    }

    /// Whether the context window around `span` mentions a restricted word,
    /// ignoring case.
    pub fn is_near_restricted_word(&self, text: &str, span: &Span) -> bool {
        let context = char_window(text, span.start, span.end, self.context_window).to_lowercase();
        self.restricted_words
            .iter()
            .any(|word| context.contains(word.as_str()))
    }
}

impl Default for EntityMerger {
    fn default() -> Self {
        Self::new()
    }
}
