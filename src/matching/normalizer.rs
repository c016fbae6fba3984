//! Text normalization for accent- and case-insensitive matching.
//!
//! Normalized text keeps a mapping from every normalized character back to
//! the byte range of the raw character it came from, so that spans found on
//! normalized text can be drawn on the original string.

use std::ops::Range;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A normalized string with its normalized-to-raw index mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    text: String,
    chars: Vec<char>,
    /// Raw byte range for each normalized char, indexed by char position.
    source: Vec<Range<usize>>,
}

impl NormalizedText {
    /// The normalized string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The normalized characters.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether normalization left nothing to search.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Raw byte range of the normalized character at `index`.
    pub fn source_range(&self, index: usize) -> Option<Range<usize>> {
        self.source.get(index).cloned()
    }

    /// Map a half-open span of normalized character indices to a raw byte range.
    ///
    /// Returns `None` for empty spans or spans past the end of the text.
    pub fn raw_range(&self, start: usize, end: usize) -> Option<Range<usize>> {
        if start >= end || end > self.source.len() {
            return None;
        }
        let first = &self.source[start];
        let last = &self.source[end - 1];
        Some(first.start.min(last.start)..first.end.max(last.end))
    }
}

/// Normalize raw text: fold case, strip diacritics, trim and collapse whitespace.
///
/// Empty or whitespace-only input normalizes to an empty text.
pub fn normalize(raw: &str) -> NormalizedText {
    let mut chars = Vec::with_capacity(raw.len());
    let mut source: Vec<Range<usize>> = Vec::with_capacity(raw.len());
    let mut pending_space: Option<Range<usize>> = None;

    for (start, c) in raw.char_indices() {
        let end = start + c.len_utf8();

        if c.is_whitespace() {
            match pending_space.as_mut() {
                Some(run) => run.end = end,
                None => pending_space = Some(start..end),
            }
            continue;
        }

        let mut folded = fold_char(c).peekable();
        if folded.peek().is_none() {
            // A standalone combining mark belongs to the character before it.
            if pending_space.is_none() {
                if let Some(last) = source.last_mut() {
                    last.end = end;
                }
            }
            continue;
        }

        if let Some(run) = pending_space.take() {
            if !chars.is_empty() {
                chars.push(' ');
                source.push(run);
            }
        }

        for f in folded {
            chars.push(f);
            source.push(start..end);
        }
    }

    NormalizedText {
        text: chars.iter().collect(),
        chars,
        source,
    }
}

/// Normalize raw text and keep only the string.
pub fn normalize_str(raw: &str) -> String {
    normalize(raw).text
}

fn fold_char(c: char) -> impl Iterator<Item = char> {
    std::iter::once(c)
        .nfd()
        .filter(|m| !is_combining_mark(*m))
        .flat_map(char::to_lowercase)
        .filter(|m| !is_combining_mark(*m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(normalize_str("  Project   Alpha  "), "project alpha");
        assert_eq!(normalize_str("JANE\tSMITH\n"), "jane smith");
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize(" \t\n ").is_empty());
    }

    #[test]
    fn test_diacritics_are_folded() {
        assert_eq!(normalize_str("Café Crème"), "cafe creme");
        assert_eq!(normalize_str("ÅNGSTRÖM"), "angstrom");
        assert_eq!(normalize_str("naïve résumé"), "naive resume");
    }

    #[test]
    fn test_decomposed_input_matches_precomposed() {
        assert_eq!(normalize_str("cafe\u{0301}"), normalize_str("caf\u{00e9}"));
    }

    #[test]
    fn test_mapping_points_at_raw_characters() {
        let raw = "Crème brûlée";
        let text = normalize(raw);
        assert_eq!(text.as_str(), "creme brulee");

        // 'e' at index 2 comes from the two-byte 'è'
        let range = text.source_range(2).unwrap();
        assert_eq!(&raw[range], "è");

        let range = text.raw_range(6, 12).unwrap();
        assert_eq!(&raw[range], "brûlée");
    }

    #[test]
    fn test_collapsed_whitespace_maps_to_whole_run() {
        let raw = "a   b";
        let text = normalize(raw);
        assert_eq!(text.as_str(), "a b");
        assert_eq!(text.source_range(1), Some(1..4));
    }

    #[test]
    fn test_standalone_mark_extends_previous_character() {
        let raw = "e\u{0301}x";
        let text = normalize(raw);
        assert_eq!(text.as_str(), "ex");
        assert_eq!(&raw[text.source_range(0).unwrap()], "e\u{0301}");
    }

    #[test]
    fn test_raw_range_rejects_out_of_bounds() {
        let text = normalize("abc");
        assert_eq!(text.raw_range(1, 1), None);
        assert_eq!(text.raw_range(2, 9), None);
        assert_eq!(text.raw_range(0, 3), Some(0..3));
    }
}
