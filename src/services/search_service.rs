//! Search service layer.
//!
//! Bundles configuration, the suggestion engine and metrics behind one
//! handle so callers do not thread them through every call.

use crate::config::{FieldWeights, SearchConfig};
use crate::error::SearchResult;
use crate::models::Searchable;
use crate::observability::{SearchMetrics, Timer};
use crate::search::{self, highlight_item, RankedResult, SearchOptions};
use crate::suggest::SuggestionEngine;
use std::collections::BTreeMap;

/// Search, highlighting and suggestions over caller-provided items.
///
/// The service never owns the corpus: items are passed to each call, and
/// `rebuild` must be called whenever the corpus changes for suggestions to
/// follow.
#[derive(Debug)]
pub struct SearchService {
    config: SearchConfig,
    engine: SuggestionEngine,
    metrics: SearchMetrics,
}

impl SearchService {
    /// Create a service, rejecting invalid configuration up front.
    pub fn new(config: SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            engine: SuggestionEngine::new(),
            metrics: SearchMetrics::new(),
        })
    }

    /// Share counters with another component.
    pub fn with_metrics(mut self, metrics: SearchMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    /// Search with the configured field weights.
    pub fn search<T: Searchable + Sync>(
        &self,
        query: &str,
        items: &[T],
    ) -> SearchResult<Vec<RankedResult>> {
        self.search_with(query, items, &SearchOptions::default())
    }

    /// Search with the configured field weights and per-call options.
    pub fn search_with<T: Searchable + Sync>(
        &self,
        query: &str,
        items: &[T],
        options: &SearchOptions,
    ) -> SearchResult<Vec<RankedResult>> {
        self.search_weighted(query, items, &self.config.field_weights, options)
    }

    /// Search with explicit field weights.
    pub fn search_weighted<T: Searchable + Sync>(
        &self,
        query: &str,
        items: &[T],
        weights: &FieldWeights,
        options: &SearchOptions,
    ) -> SearchResult<Vec<RankedResult>> {
        let timer = Timer::new("search");
        match search::search_with(query, items, weights, &self.config, options) {
            Ok(results) => {
                self.metrics.track_search(timer.finish(), results.len());
                Ok(results)
            }
            Err(e) => {
                timer.finish_with_status(false);
                self.metrics.track_invalid_configuration();
                Err(e)
            }
        }
    }

    /// Display spans for a result, read from the item it was scored on.
    pub fn highlight<T: Searchable + ?Sized>(
        &self,
        result: &RankedResult,
        item: &T,
    ) -> BTreeMap<String, Vec<(usize, usize)>> {
        highlight_item(result, item)
    }

    /// Rebuild the suggestion vocabulary from the current corpus.
    pub fn rebuild<T: Searchable>(&self, items: &[T]) -> usize {
        let timer = Timer::new("rebuild_vocabulary");
        let terms = self.engine.rebuild(items);
        self.metrics.track_rebuild(timer.finish(), terms);
        terms
    }

    /// Suggest up to the configured number of terms.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        self.suggest_n(partial, self.config.max_suggestions)
    }

    /// Suggest up to `max_results` terms.
    pub fn suggest_n(&self, partial: &str, max_results: usize) -> Vec<String> {
        let ready = self.engine.is_ready();
        let suggestions = self.engine.suggest(partial, max_results);
        self.metrics.track_suggestions(ready, suggestions.len());
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::models::{Project, Task};

    fn projects() -> Vec<Project> {
        vec![
            Project::new(1, "Project Alpha"),
            Project::new(2, "Alpha"),
            Project::new(3, "Beta"),
        ]
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SearchConfig {
            min_match_score: 2.0,
            ..SearchConfig::default()
        };
        assert!(matches!(
            SearchService::new(config),
            Err(SearchError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_search_tracks_metrics() {
        let service = SearchService::new(SearchConfig::default()).unwrap();
        let results = service.search("alpha", &projects()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(service.metrics().searches_total(), 1);
        assert_eq!(service.metrics().results_returned_total(), 2);
    }

    #[test]
    fn test_invalid_weights_are_counted() {
        let service = SearchService::new(SearchConfig::default()).unwrap();
        let weights = FieldWeights::new().with("name", 0.0);
        let result =
            service.search_weighted("alpha", &projects(), &weights, &SearchOptions::default());

        assert!(result.is_err());
        assert_eq!(service.metrics().invalid_configurations_total(), 1);
        assert_eq!(service.metrics().searches_total(), 0);
    }

    #[test]
    fn test_configured_weights_apply() {
        let config = SearchConfig {
            field_weights: FieldWeights::new().with("name", 2.0).with("description", 1.0),
            ..SearchConfig::default()
        };
        let service = SearchService::new(config).unwrap();
        let tasks = vec![Task::new(7, 1, "Alpha").with_description("Quarterly numbers")];

        let results = service.search("alpha", &tasks).unwrap();
        assert!((results[0].score() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_highlight_reads_item_text() {
        let service = SearchService::new(SearchConfig::default()).unwrap();
        let items = projects();
        let results = service.search("alpha", &items).unwrap();

        let first = &results[0];
        let item = items.iter().find(|p| p.id.to_string() == first.id().as_str()).unwrap();
        let spans = service.highlight(first, item);
        assert_eq!(spans["name"], vec![(0, 5)]);
    }

    #[test]
    fn test_suggest_uses_configured_limit() {
        let config = SearchConfig {
            max_suggestions: 1,
            ..SearchConfig::default()
        };
        let service = SearchService::new(config).unwrap();

        assert!(service.suggest("ti").is_empty());
        assert_eq!(service.metrics().suggestions_before_rebuild_total(), 1);

        let tasks = vec![Task::new(1, 1, "Timer"), Task::new(2, 1, "Timeline")];
        assert_eq!(service.rebuild(&tasks), 2);
        assert_eq!(service.suggest("ti"), vec!["Timer"]);
        assert_eq!(service.suggest_n("ti", 5), vec!["Timer", "Timeline"]);
        assert_eq!(service.metrics().suggestions_served_total(), 3);
        assert_eq!(service.metrics().vocabulary_rebuilds_total(), 1);
    }
}
