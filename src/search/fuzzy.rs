//! Edit-distance scoring for short, typo-prone queries.
//!
//! The similarity primitive short-circuits through an exact/prefix/substring
//! ladder before paying for the DP, and `|len(a) - len(b)|` is used as a
//! lower bound on edit distance to skip hopeless comparisons entirely.

use crate::config::{
    FUZZY_OVERLENGTH_PENALTY, FUZZY_PREFIX_FACTOR, FUZZY_TITLE_SUBSTRING_SCORE, FUZZY_TYPO_BOOST,
    FUZZY_WEIGHT_CODE, FUZZY_WEIGHT_DESC, FUZZY_WEIGHT_TITLE,
};
use crate::models::Course;
use rayon::prelude::*;

/// Levenshtein distance over unit-cost insert/delete/substitute.
///
/// Character-based, not byte-based, so accented letters count as single
/// edits. Single rolling row keeps the DP at O(min) memory.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
        }
    }
    dp[b_len]
}

/// Picks the edit budget from the query length when the caller supplied none.
pub fn adaptive_max_distance(query: &str) -> usize {
    match query.chars().count() {
        0..=3 => 1,
        4..=6 => 2,
        _ => 3,
    }
}

/// Similarity of `query` against `target` in [0, 1].
///
/// Exact and containment relations score on a fixed ladder; everything else
/// falls through to edit distance bounded by `max_distance`.
pub fn fuzzy_similarity(query: &str, target: &str, max_distance: usize) -> f64 {
    if query.is_empty() || target.is_empty() {
        return 0.0;
    }
    if query == target {
        return 1.0;
    }
    if query.to_uppercase() == target.to_uppercase() {
        return 0.98;
    }

    let q_len = query.chars().count();
    let t_len = target.chars().count();
    if target.starts_with(query) {
        return 0.95;
    }
    if query.starts_with(target) && q_len > 2 {
        return 0.90;
    }
    if target.contains(query) {
        return 0.85;
    }
    if query.contains(target) && q_len > t_len {
        return 0.80;
    }

    // Length difference is a lower bound on edit distance
    if q_len.abs_diff(t_len) > max_distance {
        return 0.0;
    }
    let distance = levenshtein(query, target);
    if distance > max_distance {
        return 0.0;
    }

    let mut similarity = 1.0 - distance as f64 / q_len.max(t_len) as f64;
    if q_len >= 3 && t_len > q_len && distance <= 2 {
        similarity *= FUZZY_TYPO_BOOST;
    }
    if t_len as f64 > 1.5 * q_len as f64 {
        similarity *= FUZZY_OVERLENGTH_PENALTY;
    }
    similarity.clamp(0.0, 1.0)
}

/// Best fuzzy score of one course against an uppercased, trimmed query.
///
/// Fields are tried code first, then title, then description, each with its
/// own weight; later fields only run when the earlier ones left headroom.
fn score_course(course: &Course, query: &str, max_distance: usize) -> f64 {
    let q_len = query.chars().count();
    let code = course.code.trim().to_uppercase();
    let mut best = fuzzy_similarity(query, &code, max_distance) * FUZZY_WEIGHT_CODE;

    // A miss against the full code can still be a near-hit against its
    // programme prefix: "MAAT" should reach "MAT380" through "MAT".
    if best == 0.0 && !code.is_empty() {
        let code_chars: Vec<char> = code.chars().collect();
        let lo = q_len.saturating_sub(max_distance).max(1);
        let hi = (q_len + max_distance).min(code_chars.len());
        for prefix_len in lo..=hi {
            let prefix: String = code_chars[..prefix_len].iter().collect();
            let s = fuzzy_similarity(query, &prefix, max_distance) * FUZZY_PREFIX_FACTOR;
            if s > best {
                best = s;
            }
        }
    }

    let title = course.title.to_uppercase();
    for word in title.split_whitespace() {
        if word.chars().count() < 2 {
            continue;
        }
        let s = fuzzy_similarity(query, word, max_distance);
        if s > 0.1f64.max(0.7 * best) {
            best = best.max(s * FUZZY_WEIGHT_TITLE);
        }
    }
    if best < 0.7 && title.contains(query) {
        best = best.max(FUZZY_TITLE_SUBSTRING_SCORE);
    }

    if best < 0.5 {
        let description = course.description.to_uppercase();
        for word in description.split_whitespace() {
            if word.chars().count() < 3 {
                continue;
            }
            let s = fuzzy_similarity(query, word, max_distance) * FUZZY_WEIGHT_DESC;
            if s > best {
                best = s;
            }
        }
    }

    best
}

/// Scores every candidate against the query. Returns unsorted
/// `(candidate index, score)` pairs; zero and non-finite scores are dropped.
pub fn score_courses(
    courses: &[Course],
    raw_query: &str,
    max_distance: Option<usize>,
) -> Vec<(usize, f64)> {
    let query = raw_query.trim().to_uppercase();
    if query.is_empty() {
        return vec![];
    }
    let budget = max_distance.unwrap_or_else(|| adaptive_max_distance(&query));

    courses
        .par_iter()
        .enumerate()
        .filter_map(|(i, course)| {
            let score = score_course(course, &query, budget);
            (score.is_finite() && score > 0.0).then_some((i, score))
        })
        .collect()
}
