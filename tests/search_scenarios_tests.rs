//! End-to-end scenarios over a small fixed catalog.

use course_search::models::{Course, Programme};
use course_search::search::{
    autocomplete_courses, search_bm25, search_fuzzy, search_hybrid, SearchFilters,
};

fn fixed_corpus() -> Vec<Course> {
    vec![
        Course::new(
            "MAT380",
            "MAT380 - Algèbre linéaire",
            "Matrices, espaces vectoriels et transformations linéaires.",
            Some(4),
        ),
        Course::new(
            "LOG100",
            "LOG100 - Introduction à la programmation",
            "Premiers pas en programmation structurée et résolution de problèmes.",
            Some(3),
        ),
        Course::new(
            "INF123",
            "INF123 - Structures de données",
            "Listes, piles, arbres et tables de hachage.",
            Some(3),
        ),
        Course::new(
            "ELE216",
            "ELE216 - Circuits électriques",
            "Analyse des circuits en courant continu et alternatif.",
            Some(4),
        ),
        Course::new(
            "MAT165",
            "MAT165 - Calcul différentiel",
            "Limites, dérivées et applications du calcul différentiel.",
            Some(4),
        ),
        Course::new(
            "LOG200",
            "LOG200 - Programmation avancée",
            "Programmation orientée objet et patrons de conception.",
            Some(4),
        ),
        Course::new(
            "MEC636",
            "MEC636 - Mécanique des fluides",
            "Statique et dynamique des fluides incompressibles.",
            Some(3),
        ),
        Course::new(
            "GPA123",
            "GPA123 - Automatisation industrielle",
            "Automates programmables et capteurs industriels.",
            Some(3),
        ),
    ]
}

#[test]
fn scenario_exact_code_bm25() {
    let corpus = fixed_corpus();
    let hits = search_bm25(&corpus, "MAT380", 10, None);
    assert!(!hits.is_empty());
    assert_eq!(hits[0].code, "MAT380");
    assert!(hits[0].score > 0.0);
}

#[test]
fn scenario_accented_word_bm25() {
    let corpus = fixed_corpus();
    let hits = search_bm25(&corpus, "algèbre", 10, None);
    assert_eq!(hits[0].code, "MAT380");

    // Accent folding makes the unaccented spelling equivalent
    let folded = search_bm25(&corpus, "algebre", 10, None);
    assert_eq!(folded[0].code, "MAT380");
    assert_eq!(folded.len(), hits.len());
}

#[test]
fn scenario_misspelled_code_fuzzy() {
    let corpus = fixed_corpus();
    let hits = search_fuzzy(&corpus, "MAAT380", 10, Some(2), None);
    assert!(!hits.is_empty());
    assert_eq!(hits[0].code, "MAT380");
}

#[test]
fn scenario_autocomplete_programme_prefix() {
    let corpus = fixed_corpus();
    let hits = autocomplete_courses(&corpus, "MAT", 10, None);
    assert!(hits[0].score >= 1.0);
    // Every strong hit is a MAT course, and both MAT courses lead the list
    for hit in hits.iter().filter(|h| h.score >= 1.0) {
        assert!(hit.code.starts_with("MAT"));
    }
    let mat380_pos = hits.iter().position(|h| h.code == "MAT380").unwrap();
    for (pos, hit) in hits.iter().enumerate() {
        if !hit.code.starts_with("MAT") {
            assert!(mat380_pos < pos);
        }
    }
}

#[test]
fn scenario_autocomplete_full_code() {
    let corpus = fixed_corpus();
    let hits = autocomplete_courses(&corpus, "MAT380", 10, None);
    assert_eq!(hits[0].code, "MAT380");
    assert!(hits[0].score >= 1.5);
}

#[test]
fn scenario_filtered_bm25() {
    let corpus = fixed_corpus();
    let filters = SearchFilters {
        programmes: Some(vec![Programme::Log]),
        min_credits: Some(3),
        max_credits: Some(4),
    };
    let hits = search_bm25(&corpus, "programmation", 10, Some(&filters));
    assert!(hits.iter().all(|h| h.code.starts_with("LOG")));
    assert!(hits
        .iter()
        .all(|h| (3..=4).contains(&h.credits.unwrap())));
    assert!(hits.iter().any(|h| h.code == "LOG100"));
    assert!(hits.iter().any(|h| h.code == "LOG200"));
}

#[test]
fn scenario_gibberish_hybrid_is_empty() {
    let corpus = fixed_corpus();
    assert!(search_hybrid(&corpus, "XYZ999ABC", 10, None, None).is_empty());
}

#[test]
fn scenario_autocomplete_case_insensitive() {
    let corpus = fixed_corpus();
    let lower = autocomplete_courses(&corpus, "mat", 10, None);
    let upper = autocomplete_courses(&corpus, "MAT", 10, None);
    assert_eq!(lower.len(), upper.len());
    for (a, b) in lower.iter().zip(upper.iter()) {
        assert_eq!(a.code, b.code);
        assert_eq!(a.score, b.score);
    }
}

#[test]
fn boundary_whitespace_query() {
    let corpus = fixed_corpus();
    assert!(search_bm25(&corpus, "   ", 10, None).is_empty());
    assert!(search_hybrid(&corpus, "\t\n", 10, None, None).is_empty());
}

#[test]
fn boundary_singleton_corpus_unmatched() {
    let corpus = vec![Course::new("MAT380", "MAT380 - Algèbre linéaire", "", Some(4))];
    assert!(search_bm25(&corpus, "thermodynamique", 10, None).is_empty());
}

#[test]
fn boundary_zero_limit() {
    let corpus = fixed_corpus();
    assert!(search_bm25(&corpus, "MAT380", 0, None).is_empty());
    assert!(search_hybrid(&corpus, "MAT380", 0, None, None).is_empty());
    assert!(autocomplete_courses(&corpus, "MAT", 0, None).is_empty());
}

#[test]
fn phrase_query_finds_structures_course() {
    let corpus = fixed_corpus();
    let hits = search_bm25(&corpus, "structures de données algorithmes", 10, None);
    assert!(!hits.is_empty());
    assert_eq!(hits[0].code, "INF123");
}

#[test]
fn acronym_query_reaches_spelled_out_description() {
    let corpus = fixed_corpus();
    // "POO" expands to "programmation orientée objet", which only LOG200
    // spells out in its description
    let hits = search_bm25(&corpus, "POO", 10, None);
    assert!(hits.iter().any(|h| h.code == "LOG200"));
}

#[test]
fn hybrid_explicit_runs_both_scorers() {
    let corpus = fixed_corpus();
    // BM25 alone cannot see the typo; the fuzzy half of the hybrid carries it
    let hits = search_hybrid(&corpus, "algebr", 10, None, None);
    assert!(!hits.is_empty());
    assert_eq!(hits[0].code, "MAT380");
    // Hybrid scores are normalized into [0, 1]
    assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.score)));
}
