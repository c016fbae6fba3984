//! Domain value objects and types.
//!
//! Type-safe wrappers that validate at construction time so that invalid
//! identifiers never reach the ranking pipeline.

pub mod errors;
pub mod item_id;

pub use errors::ValidationError;
pub use item_id::ItemId;
