//! Cando Search - fuzzy, accent-insensitive search over application records.
//!
//! Given a query and a list of records (projects, tasks, tags or any type
//! implementing [`Searchable`]), this library returns a deterministic ranked
//! list with per-field highlight spans, and suggests terms for partially
//! typed queries.
//!
//! # Architecture
//!
//! - **matching**: Text normalization and single-field matching
//! - **search**: Field aggregation, ranking, highlighting and the search pipeline
//! - **suggest**: Vocabulary and term suggestions
//! - **models**: The `Searchable` trait and the application's records
//! - **domain**: Validated identifiers
//! - **config**: Field weights and configuration from environment variables
//! - **error**: Custom error types for precise error handling
//! - **observability**: Logging setup and usage counters
//! - **services**: `SearchService`, bundling the above behind one handle
//!
//! # Example
//!
//! ```
//! use cando_search::{search, FieldWeights, Project, SearchConfig};
//!
//! let projects = vec![Project::new(1, "Project Alpha"), Project::new(2, "Alpha")];
//! let results = search("alpha", &projects, &FieldWeights::new(), &SearchConfig::default())?;
//! assert_eq!(results[0].id().as_str(), "2");
//! # Ok::<(), cando_search::SearchError>(())
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod models;
pub mod observability;
pub mod search;
pub mod services;
pub mod suggest;

// Re-export commonly used types
pub use config::{FieldWeights, SearchConfig};
pub use domain::{ItemId, ValidationError};
pub use error::{ConfigError, ConfigResult, SearchError, SearchResult};
pub use matching::{
    normalize, MatchClass, MatchOutcome, MatchSpan, MatchStatus, Matcher, NormalizedText,
};
pub use models::{LinkedType, Project, Searchable, SearchableItem, Tag, Task};
pub use observability::{init_logging, SearchMetrics, Timer};
pub use search::{
    highlight, highlight_item, render, search, search_with, to_display_spans, HighlightStyle,
    RankedResult, SearchOptions,
};
pub use services::SearchService;
pub use suggest::{SuggestionEngine, Vocabulary, VocabularyEntry};
