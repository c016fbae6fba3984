//! Application service layer.

mod search_service;

pub use search_service::SearchService;
