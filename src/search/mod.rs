// Re-export all search module components
pub mod autocomplete;
pub mod filters;
pub mod fuzzy;
pub mod hybrid;
pub mod results;
mod search_runner;
pub mod tokenization;

// Public exports
pub use filters::SearchFilters;
pub use search_runner::{
    autocomplete as autocomplete_courses, perform_search, search_bm25, search_fuzzy, search_hybrid,
};
