//! Term completion and correction for partial queries.

use super::vocabulary::{trim_token, Vocabulary, VocabularyEntry};
use crate::matching::{fuzzy_positions, fuzzy_score, normalize, DEFAULT_MIN_MATCH_SCORE};
use crate::models::Searchable;
use std::sync::{Arc, PoisonError, RwLock};

/// Suggests vocabulary terms for the word being typed.
///
/// The vocabulary is an immutable snapshot. `rebuild` builds a new one
/// outside the lock and swaps it in, so readers never see a partial update.
#[derive(Debug, Default)]
pub struct SuggestionEngine {
    vocabulary: RwLock<Option<Arc<Vocabulary>>>,
}

impl SuggestionEngine {
    /// Create an engine with no vocabulary; `suggest` returns nothing until `rebuild`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the vocabulary with one built from `items`.
    ///
    /// Returns the number of distinct terms.
    pub fn rebuild<T: Searchable>(&self, items: &[T]) -> usize {
        let vocabulary = Vocabulary::build(items);
        let size = vocabulary.len();
        self.install(vocabulary);
        tracing::info!(items = items.len(), terms = size, "Suggestion vocabulary rebuilt");
        size
    }

    /// Swap in a prebuilt vocabulary.
    pub fn install(&self, vocabulary: Vocabulary) {
        let mut slot = self.vocabulary.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(vocabulary));
    }

    /// Drop the vocabulary.
    pub fn clear(&self) {
        let mut slot = self.vocabulary.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// The current vocabulary snapshot, if built.
    pub fn snapshot(&self) -> Option<Arc<Vocabulary>> {
        self.vocabulary
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether `rebuild` has been called.
    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Distinct terms in the current vocabulary (0 before `rebuild`).
    pub fn vocabulary_size(&self) -> usize {
        self.snapshot().map_or(0, |v| v.len())
    }

    /// Suggest up to `max_results` terms completing the last word of `partial`.
    ///
    /// Prefix completions come first (most frequent, then shortest, then
    /// alphabetical). Remaining slots are filled with fuzzy matches, best
    /// score first. Returns nothing before the first `rebuild`.
    pub fn suggest(&self, partial: &str, max_results: usize) -> Vec<String> {
        if max_results == 0 {
            return Vec::new();
        }
        let Some(vocabulary) = self.snapshot() else {
            tracing::debug!("Suggestions requested before the vocabulary was built");
            return Vec::new();
        };

        let normalized = normalize(partial);
        let Some(token) = normalized
            .as_str()
            .rsplit(' ')
            .next()
            .map(trim_token)
            .filter(|t| !t.is_empty())
        else {
            return Vec::new();
        };

        let mut prefixed: Vec<&VocabularyEntry> = vocabulary
            .with_prefix(token)
            .iter()
            .filter(|e| e.term.len() > token.len())
            .collect();
        prefixed.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.term.chars().count().cmp(&b.term.chars().count()))
                .then_with(|| a.term.cmp(&b.term))
        });

        let mut suggestions: Vec<String> = prefixed
            .iter()
            .take(max_results)
            .map(|e| e.display.clone())
            .collect();

        if suggestions.len() < max_results {
            let query: Vec<char> = token.chars().collect();
            let mut fuzzy: Vec<(f64, &VocabularyEntry)> = vocabulary
                .entries()
                .iter()
                .filter(|e| !e.term.starts_with(token))
                .filter_map(|e| {
                    let term: Vec<char> = e.term.chars().collect();
                    let positions = fuzzy_positions(&query, &term)?;
                    let score = fuzzy_score(&positions, query.len());
                    (score >= DEFAULT_MIN_MATCH_SCORE).then_some((score, e))
                })
                .collect();
            fuzzy.sort_by(|(sa, a), (sb, b)| {
                sb.total_cmp(sa)
                    .then_with(|| b.frequency.cmp(&a.frequency))
                    .then_with(|| a.term.cmp(&b.term))
            });

            let room = max_results - suggestions.len();
            suggestions.extend(fuzzy.into_iter().take(room).map(|(_, e)| e.display.clone()));
        }

        tracing::trace!(token = %token, count = suggestions.len(), "Suggestions computed");
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use crate::models::SearchableItem;

    fn engine_from(texts: &[&str]) -> SuggestionEngine {
        let engine = SuggestionEngine::new();
        engine.install(Vocabulary::from_texts(texts));
        engine
    }

    #[test]
    fn test_suggest_before_rebuild_is_empty() {
        let engine = SuggestionEngine::new();
        assert!(!engine.is_ready());
        assert!(engine.suggest("tim", 5).is_empty());
    }

    #[test]
    fn test_prefix_suggestions() {
        let engine = engine_from(&["Timer", "Timeline", "Task"]);
        assert_eq!(engine.suggest("tim", 2), vec!["Timer", "Timeline"]);
    }

    #[test]
    fn test_frequency_orders_prefix_matches() {
        let engine = engine_from(&["Timeline", "timeline", "Timer"]);
        assert_eq!(engine.suggest("tim", 5), vec!["Timeline", "Timer"]);
    }

    #[test]
    fn test_fuzzy_fills_remaining_slots() {
        let engine = engine_from(&["Timer", "Tomato", "Transmit"]);
        // "tm" prefixes nothing; tighter subsequences rank first
        let suggestions = engine.suggest("tm", 5);
        assert_eq!(suggestions, vec!["Timer", "Tomato", "Transmit"]);

        let suggestions = engine.suggest("ti", 3);
        assert_eq!(suggestions[0], "Timer");
        assert!(suggestions.contains(&"Transmit".to_string()));
    }

    #[test]
    fn test_exact_term_is_not_suggested() {
        let engine = engine_from(&["Timer"]);
        assert!(engine.suggest("timer", 5).is_empty());
    }

    #[test]
    fn test_completes_last_word() {
        let engine = engine_from(&["Garden planning", "Plants"]);
        assert_eq!(engine.suggest("garden pla", 5), vec!["Plants", "planning"]);
    }

    #[test]
    fn test_query_punctuation_is_trimmed() {
        let engine = engine_from(&["plan planning"]);
        assert_eq!(engine.suggest("(pla", 5), vec!["plan", "planning"]);
        assert_eq!(engine.suggest("garden, \"plann", 5), vec!["planning"]);
        assert!(engine.suggest("((", 5).is_empty());
    }

    #[test]
    fn test_accent_insensitive_query() {
        let engine = engine_from(&["Crème brûlée"]);
        assert_eq!(engine.suggest("CRE", 5), vec!["Crème"]);
    }

    #[test]
    fn test_zero_limit_and_empty_query() {
        let engine = engine_from(&["Timer"]);
        assert!(engine.suggest("t", 0).is_empty());
        assert!(engine.suggest("   ", 5).is_empty());
    }

    #[test]
    fn test_rebuild_replaces_vocabulary() {
        let engine = SuggestionEngine::new();
        let first = vec![SearchableItem::new(ItemId::from(1u64)).with_field("name", "Timer")];
        assert_eq!(engine.rebuild(&first), 1);
        assert_eq!(engine.suggest("ti", 5), vec!["Timer"]);

        let second = vec![SearchableItem::new(ItemId::from(1u64)).with_field("name", "Tiles")];
        engine.rebuild(&second);
        assert_eq!(engine.suggest("ti", 5), vec!["Tiles"]);
        assert_eq!(engine.vocabulary_size(), 1);
    }

    #[test]
    fn test_rebuild_with_empty_corpus() {
        let engine = SuggestionEngine::new();
        engine.rebuild::<SearchableItem>(&[]);
        assert!(engine.is_ready());
        assert!(engine.suggest("a", 5).is_empty());
    }

    #[test]
    fn test_clear() {
        let engine = engine_from(&["Timer"]);
        engine.clear();
        assert!(engine.suggest("ti", 5).is_empty());
    }

    #[test]
    fn test_snapshot_survives_rebuild() {
        let engine = engine_from(&["Timer"]);
        let old = engine.snapshot().unwrap();
        engine.install(Vocabulary::from_texts(["Other"]));
        assert!(old.get("timer").is_some());
        assert!(engine.snapshot().unwrap().get("timer").is_none());
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let engine = Arc::new(engine_from(&["Timer"]));
        let writer = {
            let engine = engine.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    engine.install(Vocabulary::from_texts([format!("Timer{}", i)]));
                }
            })
        };
        for _ in 0..50 {
            let suggestions = engine.suggest("tim", 5);
            assert!(suggestions.len() <= 1);
        }
        writer.join().unwrap();
        assert_eq!(engine.suggest("tim", 5), vec!["Timer49"]);
    }
}
