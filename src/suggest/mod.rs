//! Term suggestions drawn from the searchable corpus.

pub mod engine;
pub mod vocabulary;

pub use engine::SuggestionEngine;
pub use vocabulary::{Vocabulary, VocabularyEntry};
