//! Hybrid dispatch: run BM25F and fuzzy side by side, normalize, fuse.
//!
//! BM25 scores are unbounded while fuzzy scores live in [0, 1], so the BM25
//! side is min-max normalized before the weighted merge. Degenerate score
//! distributions (all candidates indistinguishable, or squeezed into a tiny
//! band) are re-spread so the fused ordering still differentiates.

use crate::config::{FUSION_BM25_WEIGHT, FUSION_FUZZY_WEIGHT, RANK_EPSILON, SCORE_EPSILON};
use crate::models::{Algorithm, SearchHit};
use crate::search::results;
use ahash::AHashMap;
use std::cmp::Ordering;
use tracing::warn;

/// Relative range below which a score distribution counts as "squeezed" and
/// gets the logarithmic re-spread.
const NARROW_RANGE_FRACTION: f64 = 0.1;

/// Synthetic scores assigned to indistinguishable result sets span this band.
const SYNTHETIC_LOW: f64 = 0.9;
const SYNTHETIC_HIGH: f64 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum FusionError {
    #[error("score normalization produced a non-finite value")]
    NonFiniteScore,
}

/// Min-max normalizes BM25 scores into [0, 1] in place.
///
/// If the observed range is effectively zero the scores carry no ordering
/// information; the hits are ranked by (score desc, code asc) and assigned
/// synthetic scores linear in [0.9, 1.0] instead. A small but nonzero range
/// is stretched logarithmically after normalization.
fn normalize_scores(hits: &mut [SearchHit]) -> Result<(), FusionError> {
    if hits.is_empty() {
        return Ok(());
    }
    let max = hits.iter().map(|h| h.score).fold(f64::MIN, f64::max);
    let min = hits.iter().map(|h| h.score).fold(f64::MAX, f64::min);
    if !max.is_finite() || !min.is_finite() {
        return Err(FusionError::NonFiniteScore);
    }

    let range = max - min;
    if range < SCORE_EPSILON.max(max.abs() * 1e-6) {
        // Indistinguishable: rank deterministically, then spread
        hits.sort_by(|a, b| {
            match b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal) {
                Ordering::Equal => a.code.cmp(&b.code),
                other => other,
            }
        });
        let n = hits.len();
        for (i, hit) in hits.iter_mut().enumerate() {
            hit.score = if n == 1 {
                SYNTHETIC_HIGH
            } else {
                SYNTHETIC_HIGH - (SYNTHETIC_HIGH - SYNTHETIC_LOW) * i as f64 / (n - 1) as f64
            };
        }
        return Ok(());
    }

    let narrow = range < NARROW_RANGE_FRACTION * max.abs();
    for hit in hits.iter_mut() {
        let mut normalized = (hit.score - min) / range;
        if narrow {
            // ln(1 + 9x) / ln(10) maps [0,1] onto [0,1] while pulling the
            // low end apart
            normalized = (1.0 + 9.0 * normalized).ln() / 10f64.ln();
        }
        if !normalized.is_finite() {
            return Err(FusionError::NonFiniteScore);
        }
        hit.score = normalized;
    }
    Ok(())
}

/// Fuses normalized BM25 hits with fuzzy hits into a single ranked list.
///
/// Scores merge by course code: a course found by both scorers sums its
/// weighted contributions (capped at 1.0); a course found by one keeps its
/// weighted score alone. The per-position epsilon afterwards guarantees
/// strictly decreasing scores without disturbing the visible order.
pub fn fuse_results(
    mut bm25_hits: Vec<SearchHit>,
    fuzzy_hits: Vec<SearchHit>,
    limit: usize,
) -> Result<Vec<SearchHit>, FusionError> {
    normalize_scores(&mut bm25_hits)?;

    let mut merged: AHashMap<String, SearchHit> = AHashMap::new();
    for mut hit in bm25_hits {
        hit.score *= FUSION_BM25_WEIGHT;
        merged.insert(hit.code.clone(), hit);
    }
    for hit in fuzzy_hits {
        let weighted = hit.score * FUSION_FUZZY_WEIGHT;
        merged
            .entry(hit.code.clone())
            .and_modify(|existing| existing.score = (existing.score + weighted).min(1.0))
            .or_insert_with(|| {
                let mut h = hit;
                h.score = weighted;
                h
            });
    }

    let mut fused: Vec<SearchHit> = merged.into_values().collect();
    results::sort_hits(&mut fused);
    for (i, hit) in fused.iter_mut().enumerate() {
        hit.score = (hit.score - i as f64 * RANK_EPSILON).clamp(0.0, 1.0);
        if !hit.score.is_finite() {
            return Err(FusionError::NonFiniteScore);
        }
    }
    fused.truncate(limit);
    Ok(fused)
}

/// Fuses the two result sets, falling back to the BM25 list when fusion
/// fails. The fallback keeps the query alive at the cost of typo tolerance.
pub fn fuse_or_fall_back(
    bm25_hits: Vec<SearchHit>,
    fuzzy_hits: Vec<SearchHit>,
    limit: usize,
) -> Vec<SearchHit> {
    match fuse_results(bm25_hits.clone(), fuzzy_hits, limit) {
        Ok(fused) => fused,
        Err(e) => {
            warn!("hybrid fusion failed, serving BM25 results only: {e}");
            results::sort_and_truncate(bm25_hits, limit)
        }
    }
}

/// Picks a scorer for the default-algorithm path.
///
/// Short queries with digits look like mistyped codes and single words of
/// moderate length are where edit distance shines; long or many-word queries
/// are phrase searches where BM25 alone is both faster and better. Everything
/// else gets the full hybrid treatment.
pub fn route_query(query: &str) -> Algorithm {
    let trimmed = query.trim();
    let words = trimmed.split_whitespace().count();
    let chars = trimmed.chars().count();

    if chars > 20 || words >= 4 {
        return Algorithm::Bm25;
    }
    if trimmed.chars().any(|c| c.is_ascii_digit()) && chars <= 6 {
        return Algorithm::Fuzzy;
    }
    if words == 1 && (3..=10).contains(&chars) {
        return Algorithm::Fuzzy;
    }
    Algorithm::Hybrid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(code: &str, score: f64) -> SearchHit {
        SearchHit {
            code: code.to_string(),
            title: String::new(),
            description: String::new(),
            credits: None,
            score,
        }
    }

    #[test]
    fn test_normalize_spreads_to_unit_interval() {
        let mut hits = vec![hit("A100", 2.0), hit("B100", 6.0), hit("C100", 10.0)];
        normalize_scores(&mut hits).unwrap();
        assert_eq!(hits[0].score, 0.0);
        assert_eq!(hits[1].score, 0.5);
        assert_eq!(hits[2].score, 1.0);
    }

    #[test]
    fn test_normalize_indistinguishable_scores() {
        let mut hits = vec![hit("B100", 3.0), hit("A100", 3.0), hit("C100", 3.0)];
        normalize_scores(&mut hits).unwrap();
        // Ranked by code, spread over [0.9, 1.0]
        assert_eq!(hits[0].code, "A100");
        assert_eq!(hits[0].score, 1.0);
        assert_eq!(hits[2].code, "C100");
        assert!((hits[2].score - 0.9).abs() < 1e-12);
        assert!(hits[0].score > hits[1].score && hits[1].score > hits[2].score);
    }

    #[test]
    fn test_normalize_single_hit() {
        let mut hits = vec![hit("A100", 42.0)];
        normalize_scores(&mut hits).unwrap();
        assert_eq!(hits[0].score, 1.0);
    }

    #[test]
    fn test_narrow_range_respread_keeps_order() {
        let mut hits = vec![hit("A100", 10.0), hit("B100", 10.02), hit("C100", 10.05)];
        normalize_scores(&mut hits).unwrap();
        assert!(hits[2].score > hits[1].score);
        assert!(hits[1].score > hits[0].score);
        assert_eq!(hits[2].score, 1.0);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn test_fusion_sums_shared_codes() {
        let bm25 = vec![hit("MAT380", 8.0), hit("LOG100", 2.0)];
        let fuzzy = vec![hit("MAT380", 0.9), hit("INF123", 0.5)];
        let fused = fuse_results(bm25, fuzzy, 10).unwrap();
        // MAT380: 0.6 * 1.0 + 0.4 * 0.9 = 0.96, ahead of both single-source hits
        assert_eq!(fused[0].code, "MAT380");
        assert!((fused[0].score - 0.96).abs() < 1e-9);
        assert_eq!(fused.len(), 3);
    }

    #[test]
    fn test_fusion_scores_strictly_decrease() {
        let bm25 = vec![hit("A100", 5.0), hit("B100", 5.0), hit("C100", 5.0)];
        let fused = fuse_results(bm25, vec![], 10).unwrap();
        for pair in fused.windows(2) {
            assert!(pair[0].score > pair[1].score);
        }
    }

    #[test]
    fn test_fusion_respects_limit() {
        let bm25 = (0..20).map(|i| hit(&format!("A{i:03}"), i as f64 + 1.0)).collect();
        let fused = fuse_results(bm25, vec![], 5).unwrap();
        assert_eq!(fused.len(), 5);
    }

    #[test]
    fn test_route_query_heuristics() {
        assert_eq!(route_query("MAT380"), Algorithm::Fuzzy);
        assert_eq!(route_query("algèbre"), Algorithm::Fuzzy);
        assert_eq!(route_query("structures de données algorithmes"), Algorithm::Bm25);
        assert_eq!(route_query("introduction à la programmation orientée objet"), Algorithm::Bm25);
        assert_eq!(route_query("algèbre linéaire"), Algorithm::Hybrid);
    }
}
