//! Deterministic ordering of scored items.
//!
//! Items are sorted by descending score. Ties go to, in order:
//! 1. the shorter total length of matched field values
//! 2. the primary field's normalized text, lexicographically
//! 3. the item ID

use super::aggregator::FieldMatch;
use crate::domain::ItemId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One item of a search answer. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    id: ItemId,
    score: f64,
    fields: BTreeMap<String, FieldMatch>,
    rank: usize,
}

impl RankedResult {
    pub(crate) fn new(
        id: ItemId,
        score: f64,
        fields: BTreeMap<String, FieldMatch>,
        rank: usize,
    ) -> Self {
        Self {
            id,
            score,
            fields,
            rank,
        }
    }

    /// Identifier of the matched item.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Aggregate relevance in [0, 1].
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Per-field match outcomes for every field present on the item.
    pub fn fields(&self) -> &BTreeMap<String, FieldMatch> {
        &self.fields
    }

    /// Match outcome for one field.
    pub fn field(&self, name: &str) -> Option<&FieldMatch> {
        self.fields.get(name)
    }

    /// Zero-based position in the result list.
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// An item that matched, before ordering.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: ItemId,
    pub score: f64,
    pub fields: BTreeMap<String, FieldMatch>,
    /// Sum of the normalized lengths of matched field values
    pub matched_len: usize,
    /// Normalized text of the primary field ("" when absent)
    pub primary_text: String,
}

impl Candidate {
    fn cmp_rank(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.matched_len.cmp(&other.matched_len))
            .then_with(|| self.primary_text.cmp(&other.primary_text))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Order candidates and assign rank indices.
pub fn rank(mut candidates: Vec<Candidate>) -> Vec<RankedResult> {
    candidates.sort_by(Candidate::cmp_rank);
    candidates
        .into_iter()
        .enumerate()
        .map(|(rank, c)| RankedResult::new(c.id, c.score, c.fields, rank))
        .collect()
}
