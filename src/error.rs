//! Error types for the search core.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when running a search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A field weight or search option is outside its valid range
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfiguration { field: String, reason: String },
}

impl SearchError {
    /// Build an `InvalidConfiguration` error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::invalid("name", "weight must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for name: weight must be positive, got 0"
        );

        let err = ConfigError::Other("broken".to_string());
        assert_eq!(err.to_string(), "Configuration error: broken");
    }

    #[test]
    fn test_config_error_variants() {
        let err = ConfigError::InvalidValue {
            var: "CANDO_SEARCH_MAX_SUGGESTIONS".to_string(),
            reason: "Must be a positive number".to_string(),
        };
        assert!(err.to_string().contains("CANDO_SEARCH_MAX_SUGGESTIONS"));
        assert!(err.to_string().contains("positive number"));
    }
}
