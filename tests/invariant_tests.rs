//! Property tests for the ranking invariants: every scorer, every query,
//! every corpus must produce bounded, deterministic, duplicate-free output.

use course_search::models::{Course, Programme};
use course_search::search::{
    autocomplete_courses, search_bm25, search_fuzzy, search_hybrid, SearchFilters,
};
use proptest::prelude::*;

const PREFIXES: [&str; 5] = ["LOG", "MAT", "INF", "ELE", "GPA"];

const TITLE_WORDS: [&str; 10] = [
    "algèbre",
    "programmation",
    "structures",
    "données",
    "circuits",
    "calcul",
    "mécanique",
    "systèmes",
    "analyse",
    "conception",
];

fn arb_corpus() -> impl Strategy<Value = Vec<Course>> {
    prop::collection::vec(
        (
            0..PREFIXES.len(),
            prop::collection::vec(0..TITLE_WORDS.len(), 1..4),
            prop::option::of(0u32..10),
        ),
        0..12,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (prefix, words, credits))| {
                // Sequential numbering keeps the codes unique
                let code = format!("{}{}", PREFIXES[prefix], 100 + i);
                let title: Vec<&str> = words.iter().map(|w| TITLE_WORDS[*w]).collect();
                Course::new(&code, &title.join(" "), "", credits)
            })
            .collect()
    })
}

fn arb_query() -> impl Strategy<Value = String> {
    "[a-zA-Zéè0-9 ]{0,15}"
}

fn assert_ranked_invariants(hits: &[(String, f64)], limit: usize) {
    // |result| <= L
    assert!(hits.len() <= limit);
    for (code, score) in hits {
        // finite, non-negative scores
        assert!(score.is_finite() && *score >= 0.0, "bad score for {code}");
    }
    // non-increasing scores, ties broken by code ascending
    for pair in hits.windows(2) {
        assert!(pair[1].1 <= pair[0].1);
        if pair[1].1 == pair[0].1 {
            assert!(pair[0].0 < pair[1].0);
        }
    }
    // every code appears at most once
    let mut codes: Vec<&String> = hits.iter().map(|(c, _)| c).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), hits.len());
}

fn keyed(hits: Vec<course_search::models::SearchHit>) -> Vec<(String, f64)> {
    hits.into_iter().map(|h| (h.code, h.score)).collect()
}

proptest! {
    #[test]
    fn bm25_respects_invariants(corpus in arb_corpus(), query in arb_query(), limit in 0usize..8) {
        let hits = keyed(search_bm25(&corpus, &query, limit, None));
        assert_ranked_invariants(&hits, limit);
    }

    #[test]
    fn fuzzy_respects_invariants(corpus in arb_corpus(), query in arb_query(), limit in 0usize..8) {
        let hits = keyed(search_fuzzy(&corpus, &query, limit, None, None));
        assert_ranked_invariants(&hits, limit);
    }

    #[test]
    fn hybrid_respects_invariants(corpus in arb_corpus(), query in arb_query(), limit in 0usize..8) {
        let hits = keyed(search_hybrid(&corpus, &query, limit, None, None));
        assert_ranked_invariants(&hits, limit);
        // hybrid additionally promises scores in [0, 1]
        for (_, score) in &hits {
            prop_assert!((0.0..=1.0).contains(score));
        }
    }

    #[test]
    fn autocomplete_respects_invariants(corpus in arb_corpus(), query in arb_query(), limit in 0usize..8) {
        let hits: Vec<(String, f64)> = autocomplete_courses(&corpus, &query, limit, None)
            .into_iter()
            .map(|h| (h.code, h.score))
            .collect();
        assert_ranked_invariants(&hits, limit);
    }

    #[test]
    fn searches_are_deterministic(corpus in arb_corpus(), query in arb_query()) {
        let first = keyed(search_hybrid(&corpus, &query, 10, None, None));
        let second = keyed(search_hybrid(&corpus, &query, 10, None, None));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn empty_query_or_corpus_is_empty(corpus in arb_corpus(), query in arb_query()) {
        prop_assert!(search_bm25(&corpus, "", 10, None).is_empty());
        prop_assert!(search_bm25(&[], &query, 10, None).is_empty());
        prop_assert!(search_hybrid(&[], &query, 10, None, None).is_empty());
        prop_assert!(autocomplete_courses(&[], &query, 10, None).is_empty());
    }

    #[test]
    fn noop_filters_equal_omitted_filters(corpus in arb_corpus(), query in arb_query()) {
        let noop = SearchFilters::default();
        let with = keyed(search_bm25(&corpus, &query, 10, Some(&noop)));
        let without = keyed(search_bm25(&corpus, &query, 10, None));
        prop_assert_eq!(with, without);
    }

    #[test]
    fn programme_filter_is_absolute(corpus in arb_corpus(), query in arb_query()) {
        let filters = SearchFilters {
            programmes: Some(vec![Programme::Log]),
            ..Default::default()
        };
        for (code, _) in keyed(search_hybrid(&corpus, &query, 10, None, Some(&filters))) {
            prop_assert!(code.starts_with("LOG"));
        }
    }

    #[test]
    fn credit_filter_is_absolute(corpus in arb_corpus(), query in arb_query()) {
        let filters = SearchFilters {
            min_credits: Some(2),
            max_credits: Some(5),
            ..Default::default()
        };
        let codes: Vec<String> = search_bm25(&corpus, &query, 10, Some(&filters))
            .into_iter()
            .map(|h| h.code)
            .collect();
        for course in &corpus {
            let in_range = course.credits.is_some_and(|c| (2..=5).contains(&c));
            if !in_range {
                prop_assert!(!codes.contains(&course.code));
            }
        }
    }
}
