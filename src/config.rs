//! Configuration for the search core.
//!
//! Defaults suit interactive search over a few thousand records. Hosts can
//! override them from environment variables (and an optional `.env` file).

use crate::error::{ConfigError, ConfigResult, SearchError, SearchResult};
use crate::matching::DEFAULT_MIN_MATCH_SCORE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

/// Weight applied to fields that have no explicit weight.
pub const DEFAULT_FIELD_WEIGHT: f64 = 1.0;

/// Per-field multipliers for the aggregate score.
///
/// Fields without an entry weigh [`DEFAULT_FIELD_WEIGHT`]. Parses from
/// `"name=2.0,description=1"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldWeights(BTreeMap<String, f64>);

impl FieldWeights {
    /// Create an empty weight map (every field weighs 1.0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a weight, builder style.
    pub fn with(mut self, field: impl Into<String>, weight: f64) -> Self {
        self.set(field, weight);
        self
    }

    /// Set a weight.
    pub fn set(&mut self, field: impl Into<String>, weight: f64) {
        self.0.insert(field.into(), weight);
    }

    /// Weight for a field, defaulting to 1.0.
    pub fn get(&self, field: &str) -> f64 {
        self.0.get(field).copied().unwrap_or(DEFAULT_FIELD_WEIGHT)
    }

    /// Iterate over the explicit weights.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Whether no explicit weight is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject zero, negative and non-finite weights.
    pub fn validate(&self) -> SearchResult<()> {
        for (field, weight) in self.iter() {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(SearchError::invalid(
                    field,
                    format!("weight must be a positive number, got {}", weight),
                ));
            }
        }
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FieldWeights {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl FromStr for FieldWeights {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut weights = FieldWeights::new();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (field, weight) = pair
                .split_once('=')
                .ok_or_else(|| SearchError::invalid(pair, "expected field=weight"))?;
            let field = field.trim();
            if field.is_empty() {
                return Err(SearchError::invalid(pair, "field name cannot be empty"));
            }
            let weight: f64 = weight.trim().parse().map_err(|_| {
                SearchError::invalid(field, format!("not a number: {}", weight.trim()))
            })?;
            weights.set(field, weight);
        }
        weights.validate()?;
        Ok(weights)
    }
}

/// Configuration for searching and suggesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum score for a single field to count as matched (default: 0.05)
    pub min_match_score: f64,

    /// Field whose normalized text breaks ranking ties (default: "name")
    pub primary_field: String,

    /// Suggestions returned when the caller gives no limit (default: 5)
    pub max_suggestions: usize,

    /// Corpus size from which scoring runs in parallel (default: 10000)
    pub parallel_threshold: usize,

    /// Default field weights (default: every field weighs 1.0)
    pub field_weights: FieldWeights,
}

impl SearchConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CANDO_SEARCH_MIN_MATCH_SCORE`: per-field match threshold in [0, 1]
    /// - `CANDO_SEARCH_PRIMARY_FIELD`: tie-break field name
    /// - `CANDO_SEARCH_MAX_SUGGESTIONS`: default suggestion count
    /// - `CANDO_SEARCH_PARALLEL_THRESHOLD`: corpus size for parallel scoring
    /// - `CANDO_SEARCH_FIELD_WEIGHTS`: e.g. `name=2,description=1`
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine; a malformed one is not
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::Other(format!("Failed to load .env: {}", e)));
            }
        }

        let defaults = Self::default();

        let min_match_score =
            Self::parse_env_f64("CANDO_SEARCH_MIN_MATCH_SCORE", defaults.min_match_score)?;
        if !(0.0..=1.0).contains(&min_match_score) {
            return Err(ConfigError::InvalidValue {
                var: "CANDO_SEARCH_MIN_MATCH_SCORE".to_string(),
                reason: "Must be between 0 and 1".to_string(),
            });
        }

        let primary_field = match env::var("CANDO_SEARCH_PRIMARY_FIELD") {
            Ok(val) if val.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "CANDO_SEARCH_PRIMARY_FIELD".to_string(),
                    reason: "Cannot be empty".to_string(),
                })
            }
            Ok(val) => val.trim().to_string(),
            Err(_) => defaults.primary_field,
        };

        let max_suggestions =
            Self::parse_env_usize("CANDO_SEARCH_MAX_SUGGESTIONS", defaults.max_suggestions)?;
        let parallel_threshold = Self::parse_env_usize(
            "CANDO_SEARCH_PARALLEL_THRESHOLD",
            defaults.parallel_threshold,
        )?;

        let field_weights = match env::var("CANDO_SEARCH_FIELD_WEIGHTS") {
            Ok(val) => val.parse().map_err(|e: SearchError| ConfigError::InvalidValue {
                var: "CANDO_SEARCH_FIELD_WEIGHTS".to_string(),
                reason: e.to_string(),
            })?,
            Err(_) => defaults.field_weights,
        };

        Ok(SearchConfig {
            min_match_score,
            primary_field,
            max_suggestions,
            parallel_threshold,
            field_weights,
        })
    }

    /// Check values that would make scoring meaningless.
    pub fn validate(&self) -> SearchResult<()> {
        if !(0.0..=1.0).contains(&self.min_match_score) {
            return Err(SearchError::invalid(
                "min_match_score",
                format!("must be between 0 and 1, got {}", self.min_match_score),
            ));
        }
        self.field_weights.validate()
    }

    /// Parse an environment variable as f64 with a default value.
    fn parse_env_f64(var_name: &str, default: f64) -> ConfigResult<f64> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_match_score: DEFAULT_MIN_MATCH_SCORE,
            primary_field: "name".to_string(),
            max_suggestions: 5,
            parallel_threshold: 10_000,
            field_weights: FieldWeights::new(),
        }
    }
}
