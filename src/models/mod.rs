//! Searchable records.
//!
//! The `Searchable` trait is the only thing the search core needs from a
//! record. `SearchableItem` is a generic implementation; `Project`, `Task`
//! and `Tag` are the application's own records.

pub mod item;
pub mod project;
pub mod tag;
pub mod task;

pub use item::{Searchable, SearchableItem};
pub use project::Project;
pub use tag::{LinkedType, Tag};
pub use task::Task;
