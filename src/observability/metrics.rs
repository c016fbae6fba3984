//! Counters for search and suggestion traffic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Cloneable counters shared by every handle to a search service.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    searches_total: Arc<AtomicU64>,
    results_returned_total: Arc<AtomicU64>,
    invalid_configurations_total: Arc<AtomicU64>,
    suggestions_served_total: Arc<AtomicU64>,
    suggestions_before_rebuild_total: Arc<AtomicU64>,
    vocabulary_rebuilds_total: Arc<AtomicU64>,
}

impl SearchMetrics {
    /// Create a tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            searches_total: Arc::new(AtomicU64::new(0)),
            results_returned_total: Arc::new(AtomicU64::new(0)),
            invalid_configurations_total: Arc::new(AtomicU64::new(0)),
            suggestions_served_total: Arc::new(AtomicU64::new(0)),
            suggestions_before_rebuild_total: Arc::new(AtomicU64::new(0)),
            vocabulary_rebuilds_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a completed search.
    pub fn track_search(&self, duration_ms: u128, result_count: usize) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
        self.results_returned_total
            .fetch_add(result_count as u64, Ordering::Relaxed);

        tracing::debug!(
            duration_ms = duration_ms,
            result_count = result_count,
            "Search completed"
        );
    }

    /// Track a search rejected for invalid weights or options.
    pub fn track_invalid_configuration(&self) {
        self.invalid_configurations_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Track a suggestion request.
    pub fn track_suggestions(&self, vocabulary_ready: bool, served: usize) {
        if vocabulary_ready {
            self.suggestions_served_total
                .fetch_add(served as u64, Ordering::Relaxed);
        } else {
            self.suggestions_before_rebuild_total
                .fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Suggestion request before vocabulary rebuild");
        }
    }

    /// Track a vocabulary rebuild.
    pub fn track_rebuild(&self, duration_ms: u128, terms: usize) {
        self.vocabulary_rebuilds_total
            .fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            duration_ms = duration_ms,
            terms = terms,
            "Vocabulary rebuild tracked"
        );
    }

    pub fn searches_total(&self) -> u64 {
        self.searches_total.load(Ordering::Relaxed)
    }

    pub fn results_returned_total(&self) -> u64 {
        self.results_returned_total.load(Ordering::Relaxed)
    }

    pub fn invalid_configurations_total(&self) -> u64 {
        self.invalid_configurations_total.load(Ordering::Relaxed)
    }

    pub fn suggestions_served_total(&self) -> u64 {
        self.suggestions_served_total.load(Ordering::Relaxed)
    }

    pub fn suggestions_before_rebuild_total(&self) -> u64 {
        self.suggestions_before_rebuild_total.load(Ordering::Relaxed)
    }

    pub fn vocabulary_rebuilds_total(&self) -> u64 {
        self.vocabulary_rebuilds_total.load(Ordering::Relaxed)
    }

    /// Mean results per search (0.0 when nothing was searched).
    pub fn mean_results_per_search(&self) -> f64 {
        let searches = self.searches_total();
        if searches == 0 {
            0.0
        } else {
            self.results_returned_total() as f64 / searches as f64
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Searches: {}\n\
             Results Returned: {} ({:.2} per search)\n\
             Invalid Configurations: {}\n\
             Suggestions Served: {}\n\
             Suggestions Before Rebuild: {}\n\
             Vocabulary Rebuilds: {}",
            self.searches_total(),
            self.results_returned_total(),
            self.mean_results_per_search(),
            self.invalid_configurations_total(),
            self.suggestions_served_total(),
            self.suggestions_before_rebuild_total(),
            self.vocabulary_rebuilds_total(),
        )
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::trace!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }

    /// Finish the timer, logging failures at warn level.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        if success {
            tracing::trace!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation succeeded"
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        duration_ms
    }
}
