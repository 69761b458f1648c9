//! Pattern-based extractors using regular expressions.
//!
//! These run without any model files and stand in for the pretrained models
//! in development and offline deployments. The domain rule set recognizes
//! ISBNs, edition and volume statements, plus authors in the two positions
//! front matter usually puts them: leading the text, or after "by". Titles
//! need a real model. The general rule set flags any short capitalized run,
//! so capitalized title phrases can show up as person candidates.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use super::config::PatternFlavour;
use super::{Span, SpanExtractor, SpanLabel};
use crate::Result;
use crate::text::{byte_offset, char_index};

lazy_static! {
    static ref ISBN_REGEX: Regex = Regex::new(
        r"(?i)\bISBN(?:-1[03])?:?\s*(?P<prefixed>(?:97[89][-\s]?)?(?:\d[-\s]?){9}[\dX])\b|\b(?P<bare>97[89][-\s]?(?:\d[-\s]?){9}\d)\b"
    ).unwrap();

    static ref EDITION_REGEX: Regex = Regex::new(
        r"(?i)\b(?:\d+(?:st|nd|rd|th)|first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|revised|expanded|international|anniversary)\s+(?:edition\b|ed\.)"
    ).unwrap();

    static ref VOLUME_REGEX: Regex = Regex::new(
        r"(?i)\b(?:volume|vol\.)\s*(?:\d+\b|[ivxlc]+\b)"
    ).unwrap();

    static ref AUTHOR_CUE_REGEX: Regex = Regex::new(r"(?i)\bby\s+$").unwrap();

    static ref NAME_TOKEN_REGEX: Regex = Regex::new(
        r"\b\p{Lu}(?:\p{Ll}[\p{Ll}'\-]*|\.)"
    ).unwrap();
}

/// Capitalized words that never start or continue a person name.
const NAME_STOPWORDS: &[&str] = &[
    "a", "an", "and", "by", "the", "of", "in", "on", "for", "to", "with", "from", "isbn",
    "edition", "ed", "volume", "vol", "copyright", "published", "publisher", "publishers",
    "publishing", "press", "printed", "reprinted", "university", "college", "institute",
    "library", "books", "book", "series", "chapter", "part", "introduction", "guide",
    "handbook", "all", "rights", "reserved", "first", "second", "third", "revised",
    "international", "january", "february", "march", "april", "may", "june", "july",
    "august", "september", "october", "november", "december",
];

/// Pattern-based span extractor.
#[derive(Debug)]
pub struct PatternExtractor {
    /// Name of this extractor
    name: String,
    /// Rule set to run
    flavour: PatternFlavour,
}

impl PatternExtractor {
    /// Create a new pattern extractor running the given rule set.
    pub fn new(name: impl Into<String>, flavour: PatternFlavour) -> Self {
        Self {
            name: name.into(),
            flavour,
        }
    }

    /// Domain rule set: ISBN, edition, volume and author statements.
    pub fn domain() -> Self {
        Self::new("pattern-domain", PatternFlavour::Domain)
    }

    /// General rule set: person-name candidates.
    pub fn general() -> Self {
        Self::new("pattern-general", PatternFlavour::General)
    }

    fn span_from_bytes(text: &str, lo: usize, hi: usize, label: SpanLabel) -> Span {
        let start = char_index(text, lo);
        let end = start + text[lo..hi].chars().count();
        Span::new(&text[lo..hi], label, start, end)
    }

    /// Extract ISBNs, reporting only the number itself.
    fn extract_isbns(&self, text: &str) -> Vec<Span> {
        ISBN_REGEX
            .captures_iter(text)
            .filter_map(|caps| caps.name("prefixed").or_else(|| caps.name("bare")))
            .map(|m| Self::span_from_bytes(text, m.start(), m.end(), SpanLabel::Isbn))
            .collect()
    }

    /// Extract edition statements.
    fn extract_editions(&self, text: &str) -> Vec<Span> {
        EDITION_REGEX
            .find_iter(text)
            .map(|m| Self::span_from_bytes(text, m.start(), m.end(), SpanLabel::Edition))
            .collect()
    }

    /// Extract volume statements.
    fn extract_volumes(&self, text: &str) -> Vec<Span> {
        VOLUME_REGEX
            .find_iter(text)
            .map(|m| Self::span_from_bytes(text, m.start(), m.end(), SpanLabel::Volume))
            .collect()
    }

    /// Extract person names in author position: a name run that opens the
    /// text or directly follows "by".
    fn extract_authors(&self, text: &str) -> Vec<Span> {
        self.extract_people(text)
            .into_iter()
            .filter(|span| {
                span.start == 0
                    || AUTHOR_CUE_REGEX.is_match(&text[..byte_offset(text, span.start)])
            })
            .map(|span| span.relabel(SpanLabel::Authors))
            .collect()
    }

    /// Extract runs of two or three capitalized words separated by single
    /// spaces, broken at stopwords.
    fn extract_people(&self, text: &str) -> Vec<Span> {
        let mut people = Vec::new();
        let mut run: Vec<(usize, usize)> = Vec::new();

        for m in NAME_TOKEN_REGEX.find_iter(text) {
            let word = m.as_str().trim_end_matches('.').to_lowercase();
            let is_stopword = NAME_STOPWORDS.contains(&word.as_str());

            let continues_run = run
                .last()
                .is_some_and(|&(_, prev_end)| &text[prev_end..m.start()] == " ");
            if !continues_run || is_stopword {
                Self::flush_name_run(text, &run, &mut people);
                run.clear();
            }
            if !is_stopword {
                run.push((m.start(), m.end()));
            }
        }
        Self::flush_name_run(text, &run, &mut people);

        people
    }

    fn flush_name_run(text: &str, run: &[(usize, usize)], out: &mut Vec<Span>) {
        if !(2..=3).contains(&run.len()) {
            return;
        }
        let is_initial = |&(lo, hi): &(usize, usize)| text[lo..hi].ends_with('.');
        // A name ends in a surname, not an initial.
        if run.last().is_some_and(is_initial) || run.iter().all(is_initial) {
            return;
        }
        let lo = run[0].0;
        let hi = run[run.len() - 1].1;
        out.push(Self::span_from_bytes(text, lo, hi, SpanLabel::Person));
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::domain()
    }
}

#[async_trait]
impl SpanExtractor for PatternExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<Span>> {
        let mut spans = match self.flavour {
            PatternFlavour::Domain => {
                let mut spans = self.extract_isbns(text);
                spans.extend(self.extract_editions(text));
                spans.extend(self.extract_volumes(text));
                spans.extend(self.extract_authors(text));
                spans
            }
            PatternFlavour::General => self.extract_people(text),
        };

        // Report in reading order, like a token-classification model would.
        spans.sort_by_key(|s| s.start);

        tracing::trace!(extractor = %self.name, spans = spans.len(), "Pattern extraction complete");
        Ok(spans)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_isbn13_with_prefix() {
        let text = "Data Structures. ISBN 978-0-13-110362-7. Printed in USA";
        let spans = PatternExtractor::domain().extract(text).await.unwrap();

        let isbn = spans.iter().find(|s| s.label == SpanLabel::Isbn).unwrap();
        assert_eq!(isbn.text, "978-0-13-110362-7");
        assert_eq!(isbn.start, 22);
        assert_eq!(isbn.end, 39);
    }

    #[tokio::test]
    async fn test_isbn10_with_check_x() {
        let text = "ISBN-10: 0-8044-2957-X";
        let spans = PatternExtractor::domain().extract(text).await.unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "0-8044-2957-X");
    }

    #[tokio::test]
    async fn test_bare_isbn13() {
        let text = "Catalogue number 9781593278281 in stock";
        let spans = PatternExtractor::domain().extract(text).await.unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, SpanLabel::Isbn);
        assert_eq!(spans[0].text, "9781593278281");
    }

    #[tokio::test]
    async fn test_edition_and_volume_in_reading_order() {
        let text = "The Art of Computer Programming, Vol. IV, Second Edition";
        let spans = PatternExtractor::domain().extract(text).await.unwrap();

        let found: Vec<_> = spans
            .iter()
            .map(|s| (s.label.clone(), s.text.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (SpanLabel::Volume, "Vol. IV"),
                (SpanLabel::Edition, "Second Edition"),
            ]
        );
    }

    #[tokio::test]
    async fn test_leading_author() {
        let text = "John Smith. Data Structures, 3rd Edition. Copyright Jane Doe 2020.";
        let spans = PatternExtractor::domain().extract(text).await.unwrap();

        let authors: Vec<_> = spans
            .iter()
            .filter(|s| s.label == SpanLabel::Authors)
            .collect();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].text, "John Smith");
        assert_eq!((authors[0].start, authors[0].end), (0, 10));
    }

    #[tokio::test]
    async fn test_author_after_by() {
        let text = "The Art of Computer Programming, Vol. I, by Donald E. Knuth";
        let spans = PatternExtractor::domain().extract(text).await.unwrap();

        let found: Vec<_> = spans
            .iter()
            .map(|s| (s.label.clone(), s.text.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (SpanLabel::Volume, "Vol. I"),
                (SpanLabel::Authors, "Donald E. Knuth"),
            ]
        );
    }

    #[tokio::test]
    async fn test_by_must_be_a_word() {
        let text = "Signed copies in the lobby Ann Lee";
        let spans = PatternExtractor::domain().extract(text).await.unwrap();
        assert!(spans.is_empty());
    }

    #[tokio::test]
    async fn test_person_candidates() {
        let text = "John Smith. Data Structures, 3rd Edition. Copyright Jane Doe 2020.";
        let spans = PatternExtractor::general().extract(text).await.unwrap();

        let names: Vec<_> = spans.iter().map(|s| s.text.as_str()).collect();
        assert!(names.contains(&"John Smith"));
        assert!(names.contains(&"Jane Doe"));
        assert!(spans.iter().all(|s| s.label == SpanLabel::Person));

        let jane = spans.iter().find(|s| s.text == "Jane Doe").unwrap();
        assert_eq!(jane.start, 52);
        assert_eq!(jane.end, 60);
    }

    #[tokio::test]
    async fn test_person_with_middle_initial() {
        let text = "Written by Donald E. Knuth";
        let spans = PatternExtractor::general().extract(text).await.unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Donald E. Knuth");
    }

    #[tokio::test]
    async fn test_offsets_are_characters() {
        let text = "Préface by José Müller";
        let spans = PatternExtractor::general().extract(text).await.unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "José Müller");
        assert_eq!(spans[0].start, 11);
        assert_eq!(spans[0].end, 22);
    }
}
