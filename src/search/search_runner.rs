//! Query orchestration: validate, filter, score, order, truncate.
//!
//! Every entry point is a pure function over the candidate slice. The
//! caller owns the corpus snapshot (`corpus::CorpusHandle` hands out
//! `Arc<[Course]>`), so queries never coordinate with each other.

use crate::models::{Algorithm, AutocompleteHit, Course, SearchHit};
use crate::ranking::{self, CourseIndex};
use crate::search::filters::SearchFilters;
use crate::search::results;
use crate::search::{autocomplete as autocomplete_scorer, fuzzy, hybrid};
use tracing::debug;

/// Shared guard for degenerate inputs: empty query, empty corpus or a zero
/// limit all short-circuit to an empty response.
fn is_degenerate(courses: &[Course], query: &str, limit: usize) -> bool {
    courses.is_empty() || query.trim().is_empty() || limit == 0
}

/// Resolves the candidate slice after the filter stage. Returns an owned
/// vector only when a filter actually applies.
fn candidates<'a>(
    courses: &'a [Course],
    filters: Option<&SearchFilters>,
) -> std::borrow::Cow<'a, [Course]> {
    match filters {
        Some(f) if !f.is_empty() => std::borrow::Cow::Owned(f.apply(courses)),
        _ => std::borrow::Cow::Borrowed(courses),
    }
}

fn to_hits(candidates: &[Course], scored: Vec<(usize, f64)>) -> Vec<SearchHit> {
    scored
        .into_iter()
        .map(|(i, score)| SearchHit::from_course(&candidates[i], score))
        .collect()
}

/// Field-weighted BM25 search.
pub fn search_bm25(
    courses: &[Course],
    query: &str,
    limit: usize,
    filters: Option<&SearchFilters>,
) -> Vec<SearchHit> {
    if is_degenerate(courses, query, limit) {
        return vec![];
    }
    let candidates = candidates(courses, filters);
    let index = CourseIndex::build(&candidates);
    let scored = ranking::score_courses(&index, &candidates, query);
    debug!(candidates = candidates.len(), matched = scored.len(), "bm25 search");
    results::sort_and_truncate(to_hits(&candidates, scored), limit)
}

/// Edit-distance search for short, typo-prone queries.
pub fn search_fuzzy(
    courses: &[Course],
    query: &str,
    limit: usize,
    max_distance: Option<usize>,
    filters: Option<&SearchFilters>,
) -> Vec<SearchHit> {
    if is_degenerate(courses, query, limit) {
        return vec![];
    }
    let candidates = candidates(courses, filters);
    let scored = fuzzy::score_courses(&candidates, query, max_distance);
    debug!(candidates = candidates.len(), matched = scored.len(), "fuzzy search");
    results::sort_and_truncate(to_hits(&candidates, scored), limit)
}

/// Hybrid search: both scorers always run over an enlarged limit and their
/// results are fused; there is no query-shape short-circuit on this path.
pub fn search_hybrid(
    courses: &[Course],
    query: &str,
    limit: usize,
    max_distance: Option<usize>,
    filters: Option<&SearchFilters>,
) -> Vec<SearchHit> {
    if is_degenerate(courses, query, limit) {
        return vec![];
    }
    let candidates = candidates(courses, filters);
    let enlarged = (limit * 2).max(1);

    let index = CourseIndex::build(&candidates);
    let bm25_scored = ranking::score_courses(&index, &candidates, query);
    let bm25_hits = results::sort_and_truncate(to_hits(&candidates, bm25_scored), enlarged);

    let fuzzy_scored = fuzzy::score_courses(&candidates, query, max_distance);
    let fuzzy_hits = results::sort_and_truncate(to_hits(&candidates, fuzzy_scored), enlarged);

    debug!(
        bm25 = bm25_hits.len(),
        fuzzy = fuzzy_hits.len(),
        "hybrid search fusing result sets"
    );
    hybrid::fuse_or_fall_back(bm25_hits, fuzzy_hits, limit)
}

/// Prefix/contains autocompletion over code and title.
pub fn autocomplete(
    courses: &[Course],
    query: &str,
    limit: usize,
    filters: Option<&SearchFilters>,
) -> Vec<AutocompleteHit> {
    if is_degenerate(courses, query, limit) {
        return vec![];
    }
    let candidates = candidates(courses, filters);
    let scored = autocomplete_scorer::score_courses(&candidates, query);
    let mut hits: Vec<AutocompleteHit> = scored
        .into_iter()
        .map(|(i, score)| AutocompleteHit::from_course(&candidates[i], score))
        .collect();
    results::sort_autocomplete_hits(&mut hits);
    hits.truncate(limit);
    hits
}

/// Top-level dispatch. With an explicit algorithm the choice is honored as
/// given; with `None` the query shape picks the scorer (see
/// `hybrid::route_query`).
pub fn perform_search(
    courses: &[Course],
    query: &str,
    algorithm: Option<Algorithm>,
    limit: usize,
    max_distance: Option<usize>,
    filters: Option<&SearchFilters>,
) -> Vec<SearchHit> {
    let algorithm = algorithm.unwrap_or_else(|| {
        let routed = hybrid::route_query(query);
        debug!(?routed, "implicit algorithm routing");
        routed
    });
    match algorithm {
        Algorithm::Bm25 => search_bm25(courses, query, limit, filters),
        Algorithm::Fuzzy => search_fuzzy(courses, query, limit, max_distance, filters),
        Algorithm::Hybrid => search_hybrid(courses, query, limit, max_distance, filters),
    }
}
