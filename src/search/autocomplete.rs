//! Prefix-oriented scoring for the search-as-you-type endpoint.

use crate::models::Course;
use rayon::prelude::*;

const SCORE_CODE_EXACT: f64 = 1.5;
const SCORE_CODE_PREFIX: f64 = 1.0;
const SCORE_CODE_CONTAINS: f64 = 0.7;
const SCORE_TITLE_PREFIX: f64 = 0.6;
const SCORE_TITLE_CONTAINS: f64 = 0.3;

/// Autocomplete score of one course against an uppercased, trimmed query.
///
/// Conditions combine by maximum. Title prefix matches only count when the
/// code itself did not already match at prefix strength, so "MAT" completes
/// to MAT-coded courses before courses that merely mention "mat…" in their
/// title.
fn score_course(course: &Course, query: &str) -> f64 {
    let code = course.code.trim().to_uppercase();
    let code_score = if code == query {
        SCORE_CODE_EXACT
    } else if code.starts_with(query) {
        SCORE_CODE_PREFIX
    } else if code.contains(query) {
        SCORE_CODE_CONTAINS
    } else {
        0.0
    };

    let title = course.title.to_uppercase();
    let word_starts = title
        .split_whitespace()
        .any(|word| word.starts_with(query));

    let mut best = code_score;
    if code_score < SCORE_CODE_PREFIX && (title.starts_with(query) || word_starts) {
        best = best.max(SCORE_TITLE_PREFIX);
    }
    if !word_starts && title.contains(query) {
        best = best.max(SCORE_TITLE_CONTAINS);
    }
    best
}

/// Scores every candidate for autocompletion. Returns unsorted
/// `(candidate index, score)` pairs; only positive scores are emitted.
pub fn score_courses(courses: &[Course], raw_query: &str) -> Vec<(usize, f64)> {
    let query = raw_query.trim().to_uppercase();
    if query.is_empty() {
        return vec![];
    }

    courses
        .par_iter()
        .enumerate()
        .filter_map(|(i, course)| {
            let score = score_course(course, &query);
            (score > 0.0).then_some((i, score))
        })
        .collect()
}
