//! Normalization and single-field matching.
//!
//! Everything here works on normalized text, which is what makes matching
//! case- and accent-insensitive.

pub mod matcher;
pub mod normalizer;

pub use matcher::{
    fuzzy_positions, fuzzy_score, MatchClass, MatchOutcome, MatchSpan, MatchStatus, Matcher,
    DEFAULT_MIN_MATCH_SCORE,
};
pub use normalizer::{normalize, normalize_str, NormalizedText};
