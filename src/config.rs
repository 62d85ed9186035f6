//! Ranking constants.
//!
//! Every tunable of the scoring pipeline lives here as compile-time data.
//! The values were calibrated against the production catalog (~1,800 courses)
//! and the query log of the schedule planner front-end; changing one of them
//! shifts relative ranking, so the end-to-end tests pin the observable
//! ordering rather than raw scores.

/// BM25 term-frequency saturation parameter, shared by all fields.
pub const K1: f64 = 1.2;

/// Field weight for the course code.
pub const W_CODE: f64 = 3.0;

/// Field weight for the course code when the query itself looks like a code.
pub const W_CODE_SIGLE: f64 = 6.0;

/// Field weight for the title.
pub const W_TITLE: f64 = 1.8;

/// Field weight for the description.
pub const W_DESC: f64 = 0.8;

/// Length-normalization strength per field. Codes are near-constant length,
/// so they get the weakest normalization; descriptions the strongest.
pub const B_CODE: f64 = 0.3;
pub const B_TITLE: f64 = 0.5;
pub const B_DESC: f64 = 0.75;

/// IDF multiplier for bigram terms (those containing '_').
pub const BIGRAM_IDF_BOOST: f64 = 1.5;

/// Factor applied to the IDF floor of terms absent from the corpus, so that
/// rare-term queries still participate in the lexical boosts.
pub const RARE_TERM_IDF_FACTOR: f64 = 0.1;

/// Additive boost when the course code equals the query exactly.
pub const BOOST_CODE_EXACT: f64 = 5.0;

/// Additive boost when the code starts with a code-shaped query.
pub const BOOST_CODE_PREFIX: f64 = 2.0;

/// Additive boost when the code contains the query (3+ chars).
pub const BOOST_CODE_CONTAINS: f64 = 1.5;

/// Substring boosts for single-word queries that are not code-shaped.
pub const BOOST_TITLE_CONTAINS: f64 = 0.8;
pub const BOOST_DESC_CONTAINS: f64 = 0.5;

/// Scores at or below this threshold are treated as zero and dropped.
pub const SCORE_EPSILON: f64 = 1e-10;

/// Fuzzy field weights.
pub const FUZZY_WEIGHT_CODE: f64 = 1.0;
pub const FUZZY_WEIGHT_TITLE: f64 = 0.9;
pub const FUZZY_WEIGHT_DESC: f64 = 0.7;

/// Factor applied to code-prefix fuzzy matches ("MAAT" against "MAT" of
/// "MAT380").
pub const FUZZY_PREFIX_FACTOR: f64 = 0.9;

/// Flat score recorded when the title merely contains the query.
pub const FUZZY_TITLE_SUBSTRING_SCORE: f64 = 0.6;

/// Similarity multiplier for near-miss matches against longer targets.
pub const FUZZY_TYPO_BOOST: f64 = 1.1;

/// Similarity multiplier when the target is much longer than the query.
pub const FUZZY_OVERLENGTH_PENALTY: f64 = 0.9;

/// Hybrid fusion weights: BM25 carries the phrase signal, fuzzy the typo
/// tolerance. Must sum to 1.0 so fused scores stay in [0, 1].
pub const FUSION_BM25_WEIGHT: f64 = 0.6;
pub const FUSION_FUZZY_WEIGHT: f64 = 0.4;

/// Per-position score decrement guaranteeing strictly unique fused scores.
pub const RANK_EPSILON: f64 = 1e-12;

/// Result-count clamps applied at the CLI boundary.
pub const MAX_SEARCH_LIMIT: usize = 100;
pub const MAX_AUTOCOMPLETE_LIMIT: usize = 50;
