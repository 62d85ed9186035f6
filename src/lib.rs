//! # course-search
//!
//! Fast, fully local, ranked search engine for university course catalogs.
//!
//! This crate provides both a command-line interface and a library that can
//! be used programmatically from a host service (typically the HTTP layer of
//! a schedule planner).
//!
//! ## Features
//!
//! - French-leaning text analysis: light stemming, diacritic folding,
//!   stop-word removal, acronym expansion and bigram emission
//! - Field-weighted BM25 (code/title/description) with code-shaped query
//!   boosts
//! - Edit-distance fuzzy matching with an adaptive budget for typo-prone
//!   queries
//! - Hybrid fusion of both scorers with normalized, deterministic ranking
//! - Prefix-oriented autocompletion and programme/credit pre-filtering
//!
//! ## Examples
//!
//! ### Searching a corpus
//!
//! ```no_run
//! use course_search::corpus::{load_courses, CorpusHandle, CorpusProvider};
//! use course_search::search::{search_hybrid, SearchFilters};
//! use std::path::Path;
//!
//! let handle = CorpusHandle::new();
//! handle.install(load_courses(Path::new("courses.json")).unwrap());
//!
//! let snapshot = handle.get_snapshot();
//! let hits = search_hybrid(&snapshot, "structures de données", 10, None, None);
//! for hit in hits {
//!     println!("{:8} {:.3}  {}", hit.code, hit.score, hit.title);
//! }
//! ```
//!
//! ### Autocompletion
//!
//! ```
//! use course_search::models::Course;
//! use course_search::search::autocomplete_courses;
//!
//! let courses = vec![Course::new("MAT380", "MAT380 - Algèbre linéaire", "", Some(4))];
//! let hits = autocomplete_courses(&courses, "MAT", 10, None);
//! assert_eq!(hits[0].code, "MAT380");
//! ```

// Allow internal modules to reference the crate by its library name
extern crate self as course_search;

pub mod config;
pub mod corpus;
pub mod models;
pub mod ranking;
pub mod search;

// Re-export commonly used types for convenience
pub use corpus::{load_courses, CorpusHandle, CorpusProvider};
pub use models::{Algorithm, AutocompleteHit, Course, Programme, SearchHit};
pub use search::{
    autocomplete_courses, perform_search, search_bm25, search_fuzzy, search_hybrid, SearchFilters,
};

// Tests are defined in their respective modules with #[cfg(test)]
