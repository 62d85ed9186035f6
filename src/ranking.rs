use crate::config::{
    BIGRAM_IDF_BOOST, BOOST_CODE_CONTAINS, BOOST_CODE_EXACT, BOOST_CODE_PREFIX,
    BOOST_DESC_CONTAINS, BOOST_TITLE_CONTAINS, B_CODE, B_DESC, B_TITLE, K1, RARE_TERM_IDF_FACTOR,
    SCORE_EPSILON, W_CODE, W_CODE_SIGLE, W_DESC, W_TITLE,
};
use crate::models::Course;
use crate::search::tokenization;
use ahash::{AHashMap, AHashSet};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

// Replace standard collections with ahash versions for better performance
type HashMap<K, V> = AHashMap<K, V>;
type HashSet<T> = AHashSet<T>;

/// Term frequencies and token count for a single document field.
pub struct FieldStats {
    pub term_frequencies: HashMap<String, usize>,
    /// Token count, clamped to >= 1 to keep length normalization defined.
    pub length: usize,
}

impl FieldStats {
    fn from_text(text: &str) -> Self {
        let tokens = tokenization::tokenize(text);
        let length = tokens.len().max(1);
        let mut term_frequencies = HashMap::new();
        for token in tokens {
            *term_frequencies.entry(token).or_insert(0) += 1;
        }
        FieldStats {
            term_frequencies,
            length,
        }
    }
}

/// Preprocessed view of one course: per-field term tables plus the raw
/// strings the lexical boosts compare against.
pub struct CourseDocument {
    pub code: FieldStats,
    pub title: FieldStats,
    pub description: FieldStats,
    code_upper: String,
    title_folded: String,
    description_folded: String,
}

impl CourseDocument {
    pub fn from_course(course: &Course) -> Self {
        CourseDocument {
            code: FieldStats::from_text(&course.code),
            title: FieldStats::from_text(&course.title),
            description: FieldStats::from_text(&course.description),
            code_upper: course.code.trim().to_uppercase(),
            title_folded: tokenization::fold_diacritics(&course.title.to_lowercase()),
            description_folded: tokenization::fold_diacritics(&course.description.to_lowercase()),
        }
    }

    fn unique_terms(&self) -> HashSet<&String> {
        self.code
            .term_frequencies
            .keys()
            .chain(self.title.term_frequencies.keys())
            .chain(self.description.term_frequencies.keys())
            .collect()
    }
}

/// Corpus-wide statistics for BM25F scoring.
pub struct CourseIndex {
    pub documents: Vec<CourseDocument>,
    /// Number of documents containing each term in any field.
    pub document_frequencies: HashMap<String, usize>,
    pub n_docs: usize,
    pub avg_code_len: f64,
    pub avg_title_len: f64,
    pub avg_desc_len: f64,
}

impl CourseIndex {
    /// Preprocesses the candidate set. Corpus averages are computed over the
    /// same set the query will score against, so filtered searches see
    /// statistics for their own slice.
    pub fn build(courses: &[Course]) -> Self {
        let documents: Vec<CourseDocument> =
            courses.par_iter().map(CourseDocument::from_course).collect();
        let n_docs = documents.len();

        // Document frequencies in parallel with adaptive chunking to balance
        // parallelism against merge contention.
        let min_chunk_size = n_docs
            .checked_div(rayon::current_num_threads())
            .unwrap_or(1)
            .max(1);
        let document_frequencies = documents
            .par_iter()
            .with_min_len(min_chunk_size)
            .map(|doc| {
                let mut local_df = HashMap::new();
                for term in doc.unique_terms() {
                    *local_df.entry(term.clone()).or_insert(0) += 1;
                }
                local_df
            })
            .reduce(HashMap::new, |mut acc, local_df| {
                for (term, count) in local_df {
                    *acc.entry(term).or_insert(0) += count;
                }
                acc
            });

        let field_avg = |select: fn(&CourseDocument) -> usize| -> f64 {
            if n_docs == 0 {
                return 1.0;
            }
            let sum: f64 = documents.iter().map(|d| select(d) as f64).sum();
            (sum / n_docs as f64).max(1.0)
        };
        let avg_code_len = field_avg(|d| d.code.length);
        let avg_title_len = field_avg(|d| d.title.length);
        let avg_desc_len = field_avg(|d| d.description.length);

        CourseIndex {
            documents,
            document_frequencies,
            n_docs,
            avg_code_len,
            avg_title_len,
            avg_desc_len,
        }
    }
}

static SIGLE_QUERY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,4}[0-9]{0,4}$").unwrap());

/// A query is code-shaped iff its trimmed uppercase form is 2-4 letters
/// followed by up to 4 digits ("MAT", "GTI320", "SYS8").
pub fn is_sigle_shaped(query: &str) -> bool {
    SIGLE_QUERY_RE.is_match(&query.trim().to_uppercase())
}

/// IDF with a floor for terms absent from the corpus, so rare-term queries
/// still reach the lexical boosts instead of scoring flat zero. Bigram terms
/// get a multiplier: phrase evidence is worth more than word evidence.
fn idf(term: &str, document_frequency: usize, n_docs: usize) -> f64 {
    let n = n_docs as f64;
    let base = if document_frequency == 0 {
        (1.0 + n / 0.5).ln() * RARE_TERM_IDF_FACTOR
    } else {
        let df = document_frequency as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    };
    if term.contains('_') {
        base * BIGRAM_IDF_BOOST
    } else {
        base
    }
}

/// Per-field BM25 contribution:
/// tf * (k1+1) / (tf + k1 * (1 - b + b * len/avg_len))
fn field_contribution(stats: &FieldStats, term: &str, b: f64, avg_len: f64) -> f64 {
    let tf = stats.term_frequencies.get(term).copied().unwrap_or(0) as f64;
    if tf <= 0.0 {
        return 0.0;
    }
    let norm = 1.0 - b + b * (stats.length as f64 / avg_len);
    tf * (K1 + 1.0) / (tf + K1 * norm)
}

/// Scores every candidate with field-weighted BM25 plus the lexical boosts.
///
/// Returns unsorted `(candidate index, score)` pairs; ordering and truncation
/// belong to the results stage. Documents with non-finite or negligible
/// scores are discarded rather than failing the query.
pub fn score_courses(index: &CourseIndex, courses: &[Course], raw_query: &str) -> Vec<(usize, f64)> {
    let query_terms = tokenization::tokenize_query(raw_query);
    let query_upper = raw_query.trim().to_uppercase();
    let query_folded = tokenization::fold_diacritics(&raw_query.trim().to_lowercase());
    let sigle_shaped = is_sigle_shaped(raw_query);
    let single_word = raw_query.trim().split_whitespace().count() == 1;
    let w_code = if sigle_shaped { W_CODE_SIGLE } else { W_CODE };

    let idfs: HashMap<&str, f64> = query_terms
        .iter()
        .map(|term| {
            let df = index
                .document_frequencies
                .get(term)
                .copied()
                .unwrap_or(0);
            (term.as_str(), idf(term, df, index.n_docs))
        })
        .collect();

    (0..courses.len().min(index.documents.len()))
        .into_par_iter()
        .filter_map(|i| {
            let doc = &index.documents[i];
            let mut score = 0.0;
            for term in &query_terms {
                let term_idf = *idfs.get(term.as_str()).unwrap_or(&0.0);
                let weighted = w_code
                    * field_contribution(&doc.code, term, B_CODE, index.avg_code_len)
                    + W_TITLE * field_contribution(&doc.title, term, B_TITLE, index.avg_title_len)
                    + W_DESC
                        * field_contribution(&doc.description, term, B_DESC, index.avg_desc_len);
                score += term_idf * weighted;
            }

            if !query_upper.is_empty() {
                if doc.code_upper == query_upper {
                    score += BOOST_CODE_EXACT;
                } else if sigle_shaped && doc.code_upper.starts_with(&query_upper) {
                    score += BOOST_CODE_PREFIX;
                } else if query_upper.chars().count() >= 3 && doc.code_upper.contains(&query_upper)
                {
                    score += BOOST_CODE_CONTAINS;
                }
            }

            if single_word && !sigle_shaped && query_folded.chars().count() >= 3 {
                if doc.title_folded.contains(&query_folded) {
                    score += BOOST_TITLE_CONTAINS;
                }
                if doc.description_folded.contains(&query_folded) {
                    score += BOOST_DESC_CONTAINS;
                }
            }

            (score.is_finite() && score > SCORE_EPSILON).then_some((i, score))
        })
        .collect()
}
