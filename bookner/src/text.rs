//! Text normalization.
//!
//! Every span offset produced or consumed by this crate is a character
//! (Unicode scalar value) index into the normalized form returned by
//! [`normalize_text`], never into the raw request text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{BookNerError, Result};

lazy_static! {
    /// Unicode whitespace plus the ASCII information separators (U+001C to
    /// U+001F), which `char::is_whitespace` does not cover.
    static ref WHITESPACE_RUN: Regex = Regex::new(r"[\s\x1C-\x1F]+").unwrap();
}

/// Collapse every whitespace run to a single ASCII space and trim both ends.
///
/// Only a raw empty string is rejected. Whitespace-only input normalizes to
/// the empty string, which has no entities.
pub fn normalize_text(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(BookNerError::InvalidInput("No text provided".to_string()));
    }

    Ok(collapse_whitespace(raw))
}

/// Infallible core of [`normalize_text`].
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim_matches(' ').to_string()
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Substring of `text` covering characters `[start - radius, end + radius)`,
/// clamped to the text bounds.
pub fn char_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = start.saturating_sub(radius);
    let to = end.saturating_add(radius);
    char_slice(text, from, to)
}

/// Substring of `text` covering characters `[from, to)`, clamped to the text
/// bounds. Returns an empty slice when the range is empty after clamping.
pub fn char_slice(text: &str, from: usize, to: usize) -> &str {
    if from >= to {
        return "";
    }
    let lo = byte_offset(text, from);
    let hi = byte_offset(text, to);
    &text[lo..hi]
}

/// Byte offset of the `char_idx`-th character, or `text.len()` past the end.
pub fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Character index of the character starting at `byte_idx`.
pub fn char_index(text: &str, byte_idx: usize) -> usize {
    text[..byte_idx.min(text.len())].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_mixed_whitespace() {
        let normalized = normalize_text("  John\tSmith.\n\nData   Structures \r\n").unwrap();
        assert_eq!(normalized, "John Smith. Data Structures");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            normalize_text(""),
            Err(BookNerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_whitespace_only_input_normalizes_to_empty() {
        assert_eq!(normalize_text(" \n\t ").unwrap(), "");
        assert_eq!(normalize_text("\u{1c}\u{1f}").unwrap(), "");
    }

    #[test]
    fn test_information_separators_count_as_whitespace() {
        assert_eq!(
            normalize_text("Data\u{1e}Structures\u{1f} \u{1c}3rd Edition").unwrap(),
            "Data Structures 3rd Edition"
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let samples = [
            "already normalized text",
            "  leading and trailing  ",
            "tabs\tand\nnewlines\n\n here",
            "unicode\u{00a0}space and caf\u{e9}",
            "   \n\t ",
            "record\u{1e}separated\u{1f}fields",
        ];

        for sample in samples {
            let once = normalize_text(sample).unwrap();
            let twice = collapse_whitespace(&once);
            assert_eq!(once, twice, "normalizing {:?} twice changed it", sample);
        }
    }

    #[test]
    fn test_char_window_clamps_to_bounds() {
        let text = "Copyright Jane Doe 2020";
        assert_eq!(char_window(text, 10, 18, 20), text);
        assert_eq!(char_window(text, 10, 14, 2), "t Jane D");
        assert_eq!(char_window(text, 0, 4, 0), "Copy");
    }

    #[test]
    fn test_char_slice_counts_characters_not_bytes() {
        let text = "Café Müller wrote it";
        assert_eq!(char_slice(text, 5, 11), "Müller");
        assert_eq!(char_index(text, byte_offset(text, 5)), 5);
        assert_eq!(char_len(text), 20);
    }
}
