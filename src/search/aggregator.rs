//! Combining per-field match outcomes into one relevance score.

use crate::config::FieldWeights;
use crate::matching::{MatchOutcome, MatchSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The best match among the values of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    /// Outcome for the best-matching value
    pub outcome: MatchOutcome,

    /// Index of that value among the field's values (0 for single-valued fields)
    pub value_index: usize,

    /// Normalized length, in characters, of that value
    pub value_len: usize,
}

impl FieldMatch {
    /// Keep whichever of `self` and `other` scores higher; earlier values win ties.
    pub fn best(self, other: FieldMatch) -> FieldMatch {
        if other.outcome.score > self.outcome.score {
            other
        } else {
            self
        }
    }

    /// Score of the best value.
    pub fn score(&self) -> f64 {
        self.outcome.score
    }

    /// Matched spans of the best value.
    pub fn spans(&self) -> &[MatchSpan] {
        &self.outcome.spans
    }
}

/// Aggregate relevance of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Weighted mean of field scores, in [0, 1]
    pub score: f64,

    /// Matched spans per field, unchanged from the field outcomes
    pub highlights: BTreeMap<String, Vec<MatchSpan>>,
}

/// Combine the present fields of an item into an aggregate score.
///
/// `fields` must contain exactly the fields present on the item. Every one of
/// them counts toward the denominator, matched or not. Returns `None` when no
/// field matched, which excludes the item from results.
pub fn aggregate(
    fields: &BTreeMap<String, FieldMatch>,
    weights: &FieldWeights,
) -> Option<Aggregate> {
    let score = aggregate_score(fields, weights)?;

    let highlights = fields
        .iter()
        .map(|(name, field)| (name.clone(), field.outcome.spans.clone()))
        .collect();

    Some(Aggregate { score, highlights })
}

/// The score [`aggregate`] would produce, without collecting highlights.
pub fn aggregate_score(
    fields: &BTreeMap<String, FieldMatch>,
    weights: &FieldWeights,
) -> Option<f64> {
    if !fields.values().any(|f| f.outcome.is_match()) {
        return None;
    }

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for (name, field) in fields {
        let weight = weights.get(name);
        total_weight += weight;
        if field.outcome.is_match() {
            weighted += weight * field.outcome.score;
        }
    }

    if total_weight <= 0.0 {
        return None;
    }

    Some((weighted / total_weight).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::Matcher;

    fn field(query: &str, value: &str) -> FieldMatch {
        let outcome = Matcher::default().match_str(query, value);
        FieldMatch {
            outcome,
            value_index: 0,
            value_len: value.chars().count(),
        }
    }

    #[test]
    fn test_single_exact_field_scores_one() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), field("alpha", "Alpha"));

        let agg = aggregate(&fields, &FieldWeights::new()).unwrap();
        assert_eq!(agg.score, 1.0);
    }

    #[test]
    fn test_present_unmatched_field_stays_in_denominator() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), field("alpha", "Alpha"));
        fields.insert("description".to_string(), field("alpha", "Quarterly numbers"));

        let weights = FieldWeights::new().with("name", 2.0).with("description", 1.0);
        let agg = aggregate(&fields, &weights).unwrap();
        assert!((agg.score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_absent_field_is_ignored() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), field("alpha", "Alpha"));

        // "description" has a weight but the item does not have the field
        let weights = FieldWeights::new().with("name", 2.0).with("description", 1.0);
        let agg = aggregate(&fields, &weights).unwrap();
        assert_eq!(agg.score, 1.0);
    }

    #[test]
    fn test_no_matching_field_excludes_item() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), field("alpha", "Beta"));
        assert!(aggregate(&fields, &FieldWeights::new()).is_none());
        assert!(aggregate(&BTreeMap::new(), &FieldWeights::new()).is_none());
    }

    #[test]
    fn test_score_only_path_agrees() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), field("alp", "Alpha"));
        fields.insert("description".to_string(), field("alp", "A long path"));
        let weights = FieldWeights::new().with("name", 3.0);

        let agg = aggregate(&fields, &weights).unwrap();
        assert_eq!(aggregate_score(&fields, &weights), Some(agg.score));

        fields.clear();
        fields.insert("name".to_string(), field("alp", "Beta"));
        assert_eq!(aggregate_score(&fields, &weights), None);
    }

    #[test]
    fn test_highlights_pass_through_unchanged() {
        let mut fields = BTreeMap::new();
        let name = field("alp", "Alpha");
        let spans = name.outcome.spans.clone();
        fields.insert("name".to_string(), name);

        let agg = aggregate(&fields, &FieldWeights::new()).unwrap();
        assert_eq!(agg.highlights["name"], spans);
    }

    #[test]
    fn test_best_prefers_higher_score_then_earlier_value() {
        let a = field("alpha", "Project Alpha");
        let b = FieldMatch {
            value_index: 1,
            ..field("alpha", "Alpha")
        };
        assert_eq!(a.clone().best(b.clone()).value_index, 1);

        let c = FieldMatch {
            value_index: 2,
            ..field("alpha", "Alpha")
        };
        assert_eq!(b.best(c).value_index, 1);
    }
}
