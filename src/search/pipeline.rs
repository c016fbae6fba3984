//! End-to-end search: normalize, match, aggregate, rank.

use super::aggregator::{aggregate_score, FieldMatch};
use super::ranker::{rank, Candidate, RankedResult};
use crate::config::{FieldWeights, SearchConfig};
use crate::error::{SearchError, SearchResult};
use crate::matching::{normalize, MatchOutcome, Matcher, NormalizedText};
use crate::models::Searchable;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Per-call options, mirroring how each list screen restricts its search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Only search these fields (default: every field the item exposes)
    pub fields: Option<BTreeSet<String>>,

    /// Drop results whose aggregate score is below this (default: 0)
    pub min_score: f64,

    /// Return at most this many results (default: no limit)
    pub limit: Option<usize>,
}

impl SearchOptions {
    /// Restrict the search to the given fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Set the minimum aggregate score.
    pub fn min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set the maximum number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn validate(&self) -> SearchResult<()> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(SearchError::invalid(
                "min_score",
                format!("must be between 0 and 1, got {}", self.min_score),
            ));
        }
        Ok(())
    }

    fn allows(&self, field: &str) -> bool {
        self.fields.as_ref().map_or(true, |f| f.contains(field))
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fields: None,
            min_score: 0.0,
            limit: None,
        }
    }
}

/// Rank `items` against `query`.
///
/// An empty query returns every item with score 0 in corpus order.
///
/// # Errors
///
/// Returns `SearchError::InvalidConfiguration` for non-positive or
/// non-finite weights.
pub fn search<T: Searchable + Sync>(
    query: &str,
    items: &[T],
    weights: &FieldWeights,
    config: &SearchConfig,
) -> SearchResult<Vec<RankedResult>> {
    search_with(query, items, weights, config, &SearchOptions::default())
}

/// [`search`] with per-call options.
pub fn search_with<T: Searchable + Sync>(
    query: &str,
    items: &[T],
    weights: &FieldWeights,
    config: &SearchConfig,
    options: &SearchOptions,
) -> SearchResult<Vec<RankedResult>> {
    if let Err(e) = weights
        .validate()
        .and_then(|_| config.validate())
        .and_then(|_| options.validate())
    {
        tracing::warn!(error = %e, "Rejected search configuration");
        return Err(e);
    }

    let query = normalize(query);

    let mut results = if query.is_empty() {
        pass_through(items, options)
    } else {
        let ctx = ScoringContext {
            query: &query,
            matcher: Matcher::new(config.min_match_score),
            weights,
            options,
            primary_field: &config.primary_field,
        };
        let candidates = score_all(items, &ctx, config.parallel_threshold);
        let matched = candidates.len();
        let candidates: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| c.score >= options.min_score)
            .collect();

        tracing::debug!(
            query = %query.as_str(),
            corpus = items.len(),
            matched = matched,
            kept = candidates.len(),
            "Scored search candidates"
        );

        rank(candidates)
    };

    if let Some(limit) = options.limit {
        results.truncate(limit);
    }

    Ok(results)
}

/// Every item, unranked, for the empty query.
fn pass_through<T: Searchable>(items: &[T], options: &SearchOptions) -> Vec<RankedResult> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut fields: BTreeMap<String, FieldMatch> = BTreeMap::new();
            let mut seen: HashMap<&str, usize> = HashMap::new();
            for (name, raw) in item.field_values() {
                let value_index = seen.entry(name).or_insert(0);
                let value = normalize(raw);
                if options.allows(name) && !value.is_empty() && !fields.contains_key(name) {
                    fields.insert(
                        name.to_string(),
                        FieldMatch {
                            outcome: MatchOutcome::pass_through(),
                            value_index: *value_index,
                            value_len: value.len(),
                        },
                    );
                }
                *value_index += 1;
            }
            RankedResult::new(item.id(), 0.0, fields, index)
        })
        .collect()
}

/// Normalized field values, memoized by raw string for one search call.
#[derive(Default)]
struct NormalizationMemo<'a> {
    cache: HashMap<&'a str, NormalizedText>,
}

impl<'a> NormalizationMemo<'a> {
    fn get(&mut self, raw: &'a str) -> &NormalizedText {
        self.cache.entry(raw).or_insert_with(|| normalize(raw))
    }
}

struct ScoringContext<'q> {
    query: &'q NormalizedText,
    matcher: Matcher,
    weights: &'q FieldWeights,
    options: &'q SearchOptions,
    primary_field: &'q str,
}

impl ScoringContext<'_> {
    fn score_item<'a, T: Searchable>(
        &self,
        item: &'a T,
        memo: &mut NormalizationMemo<'a>,
    ) -> Option<Candidate> {
        let mut values_by_field: BTreeMap<&'a str, Vec<&'a str>> = BTreeMap::new();
        for (name, raw) in item.field_values() {
            values_by_field.entry(name).or_default().push(raw);
        }

        let primary_text = values_by_field
            .get(self.primary_field)
            .and_then(|values| values.first())
            .map(|&raw| memo.get(raw).as_str().to_string())
            .unwrap_or_default();

        let mut fields: BTreeMap<String, FieldMatch> = BTreeMap::new();
        for (name, values) in &values_by_field {
            if !self.options.allows(name) {
                continue;
            }

            let mut best: Option<FieldMatch> = None;
            for (value_index, &raw) in values.iter().enumerate() {
                let value = memo.get(raw);
                if value.is_empty() {
                    continue;
                }
                let candidate = FieldMatch {
                    outcome: self.matcher.match_text(self.query, value),
                    value_index,
                    value_len: value.len(),
                };
                best = Some(match best {
                    Some(current) => current.best(candidate),
                    None => candidate,
                });
            }

            // Fields with no searchable text count as absent
            if let Some(best) = best {
                fields.insert(name.to_string(), best);
            }
        }

        let Some(score) = aggregate_score(&fields, self.weights) else {
            tracing::trace!(id = %item.id(), "No field matched");
            return None;
        };

        let matched_len = fields
            .values()
            .filter(|f| f.outcome.is_match())
            .map(|f| f.value_len)
            .sum();

        Some(Candidate {
            id: item.id(),
            score,
            fields,
            matched_len,
            primary_text,
        })
    }
}

#[cfg(feature = "parallel")]
fn score_all<T: Searchable + Sync>(
    items: &[T],
    ctx: &ScoringContext<'_>,
    parallel_threshold: usize,
) -> Vec<Candidate> {
    use rayon::prelude::*;

    if items.len() < parallel_threshold {
        return score_sequential(items, ctx);
    }

    tracing::debug!(corpus = items.len(), "Scoring items in parallel");
    items
        .par_iter()
        .map_init(NormalizationMemo::default, |memo, item| ctx.score_item(item, memo))
        .flatten()
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_all<T: Searchable + Sync>(
    items: &[T],
    ctx: &ScoringContext<'_>,
    _parallel_threshold: usize,
) -> Vec<Candidate> {
    score_sequential(items, ctx)
}

fn score_sequential<T: Searchable>(items: &[T], ctx: &ScoringContext<'_>) -> Vec<Candidate> {
    let mut memo = NormalizationMemo::default();
    items
        .iter()
        .filter_map(|item| ctx.score_item(item, &mut memo))
        .collect()
}
