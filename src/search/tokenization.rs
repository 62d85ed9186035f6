use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static HTML_ENTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&#?[a-z0-9]+;").unwrap());

/// Static set of French stop words, stored lowercase with diacritics folded.
///
/// Beyond the usual articles and prepositions, the tail of the list is
/// catalog filler: words like "cours" or "permet" appear in nearly every
/// course description and carry no ranking signal.
static FRENCH_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "le", "la", "les", "l", "un", "une", "des", "de", "du", "d", "et", "ou", "a", "au", "aux",
        "en", "dans", "sur", "sous", "pour", "par", "avec", "sans", "entre", "vers", "chez", "ce",
        "cet", "cette", "ces", "se", "son", "sa", "ses", "leur", "leurs", "qui", "que", "dont",
        "ne", "pas", "est", "sont", "etre", "ont", "comme", "ainsi", "aussi", "plus", "tres",
        "tout", "tous", "toute", "toutes", "autres", "meme", "afin", "lors", "selon",
        // Catalog filler
        "cours", "etudiant", "etudiants", "permet", "permettre", "permettant", "vise", "visant",
        "offre", "offert", "notion", "notions", "presente", "travail", "travaux", "traval",
        "introduction", "base", "bases", "principe", "principes", "element", "elements",
        "apprentissage", "objectif", "objectifs", "contenu", "terme", "matiere",
    ])
});

/// Query-side acronym expansions, keyed by the uppercase surface form.
///
/// Expansion is deliberately asymmetric: a student typing "POO" should match
/// descriptions spelling out "programmation orientée objet", but documents
/// never expand, so the reverse direction stays precise.
static ACRONYM_EXPANSIONS: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        HashMap::from([
            ("POO", &["programmation", "orientée", "objet"][..]),
            ("BD", &["base", "données"][..]),
            ("BDD", &["base", "données"][..]),
            ("IA", &["intelligence", "artificielle"][..]),
            ("ML", &["apprentissage", "machine", "learning"][..]),
            ("GL", &["génie", "logiciel"][..]),
            ("OS", &["système", "exploitation"][..]),
            ("SE", &["système", "exploitation"][..]),
            ("API", &["interface", "programmation", "application"][..]),
            ("REST", &["representational", "state", "transfer"][..]),
            ("HTTP", &["hypertext", "transfer", "protocol"][..]),
            ("TCP", &["transmission", "control", "protocol"][..]),
            ("IP", &["internet", "protocol"][..]),
            ("CLI", &["interface", "ligne", "commande"][..]),
            ("GUI", &["interface", "graphique", "utilisateur"][..]),
            ("SQL", &["structured", "query", "language"][..]),
            ("UML", &["langage", "modélisation", "unifié"][..]),
            ("TI", &["technologies", "information"][..]),
        ])
    });

/// Ordered suffix rewrites of the light French stemmer. The first matching
/// rule wins; identity rules ("ation" -> "ation") pin singular forms so the
/// trailing-s fallback never mangles them.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ements", "ement"),
    ("ement", "ement"),
    ("ations", "ation"),
    ("ation", "ation"),
    ("iques", "ique"),
    ("ique", "ique"),
    ("eurs", "eur"),
    ("eur", "eur"),
    ("ités", "ité"),
    ("ité", "ité"),
    ("euses", "euse"),
    ("euse", "euse"),
    ("iers", "ier"),
    ("ier", "ier"),
    ("ables", "able"),
    ("able", "able"),
    ("ibles", "ible"),
    ("ible", "ible"),
    ("ifs", "if"),
    ("if", "if"),
    ("ives", "ive"),
    ("ive", "ive"),
    ("ances", "ance"),
    ("ance", "ance"),
    ("ences", "ence"),
    ("ence", "ence"),
    ("tions", "tion"),
    ("tion", "tion"),
    ("elles", "elle"),
    ("elle", "elle"),
    ("aux", "al"),
];

/// Suffixes that block the trailing-s fallback ("cactus" must not become
/// "cactu").
const PLURAL_EXCEPTIONS: &[&str] = &["ss", "us", "is", "os"];

/// Lowercases, strips HTML tags and entities, collapses whitespace and trims.
/// Accents are preserved at this stage; folding happens after stemming.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_tags = HTML_TAG_RE.replace_all(&lowered, " ");
    let no_entities = HTML_ENTITY_RE.replace_all(&no_tags, " ");
    no_entities.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replaces every character outside the Unicode letter/number classes with a
/// space. Accented letters survive.
fn mask_non_alphanumeric(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}

/// Inserts a space at every letter/digit boundary so "gti320" splits into
/// "gti 320". Course codes embedded in titles then tokenize the same way as
/// code-shaped queries.
fn split_letter_digit_boundaries(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if let Some(p) = prev {
            let boundary = (p.is_alphabetic() && c.is_numeric())
                || (p.is_numeric() && c.is_alphabetic());
            if boundary {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Applies the light French suffix rules to a single token.
///
/// Tokens shorter than 5 characters pass through untouched; everything else
/// gets the first matching suffix rewrite, or the trailing-s fallback.
pub fn stem(token: &str) -> String {
    if token.chars().count() < 5 {
        return token.to_string();
    }
    for (suffix, replacement) in SUFFIX_RULES {
        if token.ends_with(suffix) {
            let head = &token[..token.len() - suffix.len()];
            return format!("{head}{replacement}");
        }
    }
    if token.ends_with('s') && !PLURAL_EXCEPTIONS.iter().any(|e| token.ends_with(e)) {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}

/// Strips combining marks after NFD decomposition: "algèbre" -> "algebre".
pub fn fold_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Checks a folded, lowercase word against the stop list.
pub fn is_stop_word(word: &str) -> bool {
    FRENCH_STOP_WORDS.contains(word)
}

fn raw_tokens(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let masked = mask_non_alphanumeric(&normalized);
    let split = split_letter_digit_boundaries(&masked);
    split.split_whitespace().map(String::from).collect()
}

/// Stems and folds one raw token; `None` when the surface form or the stem is
/// a stop word.
fn process_token(raw: &str) -> Option<String> {
    let surface = fold_diacritics(raw);
    if is_stop_word(&surface) {
        return None;
    }
    let stemmed = fold_diacritics(&stem(raw));
    if is_stop_word(&stemmed) {
        return None;
    }
    Some(stemmed)
}

/// Appends "a_b" concatenations for all adjacent unigram pairs. Unigrams stay
/// in place; bigrams count toward field length like any other token.
fn with_bigrams(unigrams: Vec<String>) -> Vec<String> {
    let bigrams: Vec<String> = unigrams
        .windows(2)
        .map(|pair| format!("{}_{}", pair[0], pair[1]))
        .collect();
    let mut tokens = unigrams;
    tokens.extend(bigrams);
    tokens
}

/// Tokenizes a document field: normalize, mask, boundary-split, stem, fold,
/// strip stop words, emit bigrams. Duplicates are preserved so term
/// frequencies stay meaningful.
pub fn tokenize(text: &str) -> Vec<String> {
    let unigrams: Vec<String> = raw_tokens(text)
        .iter()
        .filter_map(|raw| process_token(raw))
        .collect();
    with_bigrams(unigrams)
}

/// Tokenizes a query: the document pipeline plus acronym expansion, then
/// deduplication preserving first occurrence.
pub fn tokenize_query(text: &str) -> Vec<String> {
    let raws = raw_tokens(text);
    let mut unigrams = Vec::new();
    let mut expansions = Vec::new();
    for raw in &raws {
        let Some(token) = process_token(raw) else {
            continue;
        };
        unigrams.push(token);
        if let Some(terms) = ACRONYM_EXPANSIONS.get(raw.to_uppercase().as_str()) {
            for term in *terms {
                if let Some(expanded) = process_token(term) {
                    expansions.push(expanded);
                }
            }
        }
    }
    unigrams.extend(expansions);

    let mut seen = HashSet::new();
    with_bigrams(unigrams)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
