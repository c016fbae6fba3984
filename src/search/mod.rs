//! Multi-field search over a corpus snapshot.
//!
//! This module turns per-field match outcomes into ranked, highlightable
//! results: aggregation with field weights, deterministic ranking, and
//! re-anchoring of matched spans onto the raw text.

pub mod aggregator;
pub mod highlighter;
pub mod pipeline;
pub mod ranker;

pub use aggregator::{aggregate, aggregate_score, Aggregate, FieldMatch};
pub use highlighter::{
    display_spans, highlight, highlight_item, render, to_display_spans, HighlightStyle,
};
pub use pipeline::{search, search_with, SearchOptions};
pub use ranker::{rank, Candidate, RankedResult};
