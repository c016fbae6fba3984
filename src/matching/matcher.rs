//! Single-field matching of a normalized query against a normalized value.
//!
//! Four match classes are tried, best first:
//! - Exact: the value equals the query (1.0)
//! - Prefix: the value starts with the query (0.85-0.9)
//! - Substring: the query occurs later in the value (0.6-0.85)
//! - Fuzzy: the query is an in-order subsequence of the value (below 0.6)
//!
//! The score bands do not overlap, so the first class that applies is also
//! the highest-scoring one.

use super::normalizer::{normalize, NormalizedText};
use serde::{Deserialize, Serialize};

/// Default minimum score for a field to count as matched.
pub const DEFAULT_MIN_MATCH_SCORE: f64 = 0.05;

const PREFIX_SCORE: f64 = 0.9;
const PREFIX_TAIL_PENALTY: f64 = 0.05;
const SUBSTRING_FLOOR: f64 = 0.6;
const SUBSTRING_RANGE: f64 = 0.25;
const FUZZY_CEILING: f64 = 0.59;

/// How a query matched a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchClass {
    /// Whole value equals the query
    Exact,
    /// Value starts with the query
    Prefix,
    /// Query occurs contiguously inside the value
    Substring,
    /// Query characters occur in order with gaps
    Fuzzy,
}

/// Whether a match happened, and if so of which class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// The query matched
    Matched(MatchClass),
    /// A non-empty query did not match
    NoMatch,
    /// The query was empty; everything passes with score 0
    PassThrough,
}

/// A matched range of normalized character indices, half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub class: MatchClass,
}

/// Result of matching one query against one field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Relevance in [0, 1]; 0 means no contribution
    pub score: f64,

    /// Match status
    pub status: MatchStatus,

    /// Sorted, non-overlapping matched ranges
    pub spans: Vec<MatchSpan>,
}

impl MatchOutcome {
    /// The outcome for a non-empty query that found nothing.
    pub fn no_match() -> Self {
        Self {
            score: 0.0,
            status: MatchStatus::NoMatch,
            spans: Vec::new(),
        }
    }

    /// The outcome for an empty query.
    pub fn pass_through() -> Self {
        Self {
            score: 0.0,
            status: MatchStatus::PassThrough,
            spans: Vec::new(),
        }
    }

    /// Whether the query matched.
    pub fn is_match(&self) -> bool {
        matches!(self.status, MatchStatus::Matched(_))
    }

    /// The match class, if any.
    pub fn class(&self) -> Option<MatchClass> {
        match self.status {
            MatchStatus::Matched(class) => Some(class),
            _ => None,
        }
    }

    fn matched(score: f64, class: MatchClass, spans: Vec<MatchSpan>) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            status: MatchStatus::Matched(class),
            spans,
        }
    }
}

/// Field matcher with a configurable minimum score.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    min_score: f64,
}

impl Matcher {
    /// Create a matcher that discards matches scoring below `min_score`.
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }

    /// The minimum score for a match.
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Match a normalized query against a normalized field value.
    pub fn match_text(&self, query: &NormalizedText, value: &NormalizedText) -> MatchOutcome {
        if query.is_empty() {
            return MatchOutcome::pass_through();
        }
        if value.is_empty() {
            return MatchOutcome::no_match();
        }

        let outcome = Self::exact(query, value)
            .or_else(|| Self::prefix(query, value))
            .or_else(|| Self::substring(query, value))
            .or_else(|| Self::fuzzy(query, value));

        match outcome {
            Some(outcome) if outcome.score >= self.min_score && outcome.score > 0.0 => outcome,
            _ => MatchOutcome::no_match(),
        }
    }

    /// Normalize both strings and match them.
    pub fn match_str(&self, query: &str, value: &str) -> MatchOutcome {
        self.match_text(&normalize(query), &normalize(value))
    }

    fn exact(query: &NormalizedText, value: &NormalizedText) -> Option<MatchOutcome> {
        if query.as_str() != value.as_str() {
            return None;
        }
        Some(MatchOutcome::matched(
            1.0,
            MatchClass::Exact,
            vec![MatchSpan {
                start: 0,
                end: value.len(),
                class: MatchClass::Exact,
            }],
        ))
    }

    fn prefix(query: &NormalizedText, value: &NormalizedText) -> Option<MatchOutcome> {
        if !value.as_str().starts_with(query.as_str()) {
            return None;
        }
        let trailing = (value.len() - query.len()) as f64;
        let score = PREFIX_SCORE - PREFIX_TAIL_PENALTY * trailing / value.len() as f64;
        Some(MatchOutcome::matched(
            score,
            MatchClass::Prefix,
            vec![MatchSpan {
                start: 0,
                end: query.len(),
                class: MatchClass::Prefix,
            }],
        ))
    }

    fn substring(query: &NormalizedText, value: &NormalizedText) -> Option<MatchOutcome> {
        let byte_pos = value.as_str().find(query.as_str())?;
        let start = value.as_str()[..byte_pos].chars().count();
        let len = value.len() as f64;

        let earliness = 1.0 - start as f64 / len;
        let coverage = query.len() as f64 / len;
        let score = SUBSTRING_FLOOR + SUBSTRING_RANGE * (0.5 * earliness + 0.5 * coverage);

        Some(MatchOutcome::matched(
            score.clamp(SUBSTRING_FLOOR, SUBSTRING_FLOOR + SUBSTRING_RANGE),
            MatchClass::Substring,
            vec![MatchSpan {
                start,
                end: start + query.len(),
                class: MatchClass::Substring,
            }],
        ))
    }

    fn fuzzy(query: &NormalizedText, value: &NormalizedText) -> Option<MatchOutcome> {
        let positions = fuzzy_positions(query.chars(), value.chars())?;
        let score = fuzzy_score(&positions, query.len());
        Some(MatchOutcome::matched(
            score,
            MatchClass::Fuzzy,
            coalesce(&positions, MatchClass::Fuzzy),
        ))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_MATCH_SCORE)
    }
}

/// Find the tightest in-order placement of `query` inside `value`.
///
/// A forward scan finds the earliest position where the whole query has been
/// seen; a backward scan from there picks the latest start, giving the
/// shortest window that ends at that position.
pub fn fuzzy_positions(query: &[char], value: &[char]) -> Option<Vec<usize>> {
    if query.is_empty() || query.len() > value.len() {
        return None;
    }

    let mut qi = 0;
    let mut end = None;
    for (vi, c) in value.iter().enumerate() {
        if *c == query[qi] {
            qi += 1;
            if qi == query.len() {
                end = Some(vi);
                break;
            }
        }
    }
    let end = end?;

    let mut positions = vec![0; query.len()];
    let mut qi = query.len();
    for vi in (0..=end).rev() {
        if value[vi] == query[qi - 1] {
            qi -= 1;
            positions[qi] = vi;
            if qi == 0 {
                break;
            }
        }
    }

    Some(positions)
}

/// Score a fuzzy placement. Always below 0.6.
///
/// Combines the share of query characters matched, a contiguity bonus that
/// shrinks with the total gap between matched characters, and a bonus for
/// starting near the beginning of the value.
pub fn fuzzy_score(positions: &[usize], query_len: usize) -> f64 {
    let Some(&first) = positions.iter().min() else {
        return 0.0;
    };
    if query_len == 0 {
        return 0.0;
    }

    // Positions come from `fuzzy_positions` in ascending order; other input
    // is scored without overflowing
    let matched = positions.len();
    let gaps: usize = positions
        .windows(2)
        .map(|pair| pair[1].saturating_sub(pair[0]).saturating_sub(1))
        .sum();

    let ratio = matched as f64 / query_len as f64;
    let contiguity = 1.0 / (1.0 + gaps as f64);
    let position = 1.0 / (1.0 + first as f64);

    FUZZY_CEILING * (0.2 * ratio + 0.5 * contiguity + 0.3 * position)
}

/// Merge consecutive positions into maximal runs.
fn coalesce(positions: &[usize], class: MatchClass) -> Vec<MatchSpan> {
    let mut spans: Vec<MatchSpan> = Vec::new();
    for &pos in positions {
        match spans.last_mut() {
            Some(span) if span.end == pos => span.end = pos + 1,
            _ => spans.push(MatchSpan {
                start: pos,
                end: pos + 1,
                class,
            }),
        }
    }
    spans
}
