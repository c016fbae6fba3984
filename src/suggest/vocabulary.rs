//! Term vocabulary built from a corpus snapshot.

use crate::matching::normalize_str;
use crate::models::Searchable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A distinct normalized term and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Normalized term
    pub term: String,

    /// Most frequent raw spelling, used when suggesting
    pub display: String,

    /// Occurrences across all field values of all items
    pub frequency: usize,
}

/// Immutable set of terms, sorted by normalized term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
}

impl Vocabulary {
    /// Tokenize every field value of every item.
    pub fn build<T: Searchable>(items: &[T]) -> Self {
        let mut builder = VocabularyBuilder::default();
        for item in items {
            for (_, raw) in item.field_values() {
                builder.add_text(raw);
            }
        }
        builder.finish()
    }

    /// Tokenize loose strings.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = VocabularyBuilder::default();
        for text in texts {
            builder.add_text(text.as_ref());
        }
        builder.finish()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no terms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, sorted by term.
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Look up a normalized term.
    pub fn get(&self, term: &str) -> Option<&VocabularyEntry> {
        self.entries
            .binary_search_by(|e| e.term.as_str().cmp(term))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Entries whose term starts with `prefix` (including the prefix itself).
    pub fn with_prefix(&self, prefix: &str) -> &[VocabularyEntry] {
        let start = self.entries.partition_point(|e| e.term.as_str() < prefix);
        let len = self.entries[start..]
            .iter()
            .take_while(|e| e.term.starts_with(prefix))
            .count();
        &self.entries[start..start + len]
    }
}

/// Strip punctuation from both ends of a whitespace-delimited token.
pub(crate) fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

#[derive(Default)]
struct VocabularyBuilder {
    /// term -> raw spelling -> count
    spellings: HashMap<String, BTreeMap<String, usize>>,
}

impl VocabularyBuilder {
    fn add_text(&mut self, raw: &str) {
        for token in raw.split_whitespace() {
            let token = trim_token(token);
            if token.is_empty() {
                continue;
            }
            let term = normalize_str(token);
            if term.is_empty() {
                continue;
            }
            *self
                .spellings
                .entry(term)
                .or_default()
                .entry(token.to_string())
                .or_insert(0) += 1;
        }
    }

    fn finish(self) -> Vocabulary {
        let mut entries: Vec<VocabularyEntry> = self
            .spellings
            .into_iter()
            .filter_map(|(term, spellings)| {
                let frequency = spellings.values().sum();
                // Most frequent spelling; BTreeMap order makes ties pick the smallest
                let display = spellings
                    .iter()
                    .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                    .map(|(spelling, _)| spelling.clone())?;
                Some(VocabularyEntry {
                    term,
                    display,
                    frequency,
                })
            })
            .collect();
        entries.sort_by(|a, b| a.term.cmp(&b.term));
        Vocabulary { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_are_normalized_and_counted() {
        let vocab = Vocabulary::from_texts(["Timer timer", "TIMER, Café", "cafe"]);
        assert_eq!(vocab.len(), 2);

        let timer = vocab.get("timer").unwrap();
        assert_eq!(timer.frequency, 3);

        let cafe = vocab.get("cafe").unwrap();
        assert_eq!(cafe.frequency, 2);
    }

    #[test]
    fn test_display_is_most_frequent_spelling() {
        let vocab = Vocabulary::from_texts(["Rust rust Rust", "RUST"]);
        assert_eq!(vocab.get("rust").unwrap().display, "Rust");

        // Tie: smallest spelling wins
        let vocab = Vocabulary::from_texts(["beta Beta"]);
        assert_eq!(vocab.get("beta").unwrap().display, "Beta");
    }

    #[test]
    fn test_punctuation_is_trimmed() {
        let vocab = Vocabulary::from_texts(["(draft) report... --"]);
        assert!(vocab.get("draft").is_some());
        assert!(vocab.get("report").is_some());
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_with_prefix() {
        let vocab = Vocabulary::from_texts(["Timer Timeline Task tim"]);
        let terms: Vec<&str> = vocab.with_prefix("tim").iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["tim", "timeline", "timer"]);
        assert!(vocab.with_prefix("zzz").is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let vocab = Vocabulary::from_texts(Vec::<String>::new());
        assert!(vocab.is_empty());
    }
}
