//! Deterministic ordering and truncation of ranked hits.

use crate::models::{AutocompleteHit, SearchHit};
use std::cmp::Ordering;

/// Sorts by score descending, then by code ascending so equal scores always
/// come back in the same order.
pub fn sort_hits(hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| {
        // unwrap_or(Ordering::Equal) keeps the sort total even if a NaN
        // slipped past the per-document guards
        match b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal) {
            Ordering::Equal => a.code.cmp(&b.code),
            other => other,
        }
    });
}

/// Same ordering for autocomplete hits.
pub fn sort_autocomplete_hits(hits: &mut [AutocompleteHit]) {
    hits.sort_by(|a, b| {
        match b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal) {
            Ordering::Equal => a.code.cmp(&b.code),
            other => other,
        }
    });
}

/// Sorts and truncates in one step.
pub fn sort_and_truncate(mut hits: Vec<SearchHit>, limit: usize) -> Vec<SearchHit> {
    sort_hits(&mut hits);
    hits.truncate(limit);
    hits
}
