use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single course record as produced by the catalog scraper.
///
/// Records are immutable once installed in a snapshot. `programme_prefix` is
/// derived from `code` at ingest time (see `corpus::normalize_courses`) and is
/// only stored so the filter stage can match on it without re-deriving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Short alphanumeric identifier, uppercase canonical (e.g. "MAT380").
    pub code: String,
    /// Human title, typically "CODE - Description". May be empty.
    #[serde(default)]
    pub title: String,
    /// Multi-sentence free text. May be empty.
    #[serde(default)]
    pub description: String,
    /// Number of credits. Absent for records the scraper could not resolve.
    #[serde(default)]
    pub credits: Option<u32>,
    /// Leading alphabetic run of `code` (e.g. "MAT"), uppercase.
    #[serde(default)]
    pub programme_prefix: String,
}

impl Course {
    /// Builds a normalized course record. Mainly used by tests and benches;
    /// bulk ingest goes through `corpus::normalize_courses`.
    pub fn new(code: &str, title: &str, description: &str, credits: Option<u32>) -> Self {
        let code = code.trim().to_uppercase();
        let programme_prefix = programme_prefix_of(&code);
        Course {
            code,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            credits,
            programme_prefix,
        }
    }
}

/// Extracts the leading alphabetic run of a course code.
///
/// The code is expected to be uppercase already; the prefix is returned as-is
/// so "MAT380" yields "MAT" and "SYS863-A25" yields "SYS".
pub fn programme_prefix_of(code: &str) -> String {
    code.chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect()
}

/// Known programme tags, matched against a course's programme prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Programme {
    Log,
    Inf,
    Mat,
    Ele,
    Mec,
    Gpa,
    Ti,
    Gti,
    Sys,
    Ctn,
    Gol,
    Phy,
    Ate,
}

impl Programme {
    /// All known programme tags, in display order.
    pub const ALL: [Programme; 13] = [
        Programme::Log,
        Programme::Inf,
        Programme::Mat,
        Programme::Ele,
        Programme::Mec,
        Programme::Gpa,
        Programme::Ti,
        Programme::Gti,
        Programme::Sys,
        Programme::Ctn,
        Programme::Gol,
        Programme::Phy,
        Programme::Ate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Programme::Log => "LOG",
            Programme::Inf => "INF",
            Programme::Mat => "MAT",
            Programme::Ele => "ELE",
            Programme::Mec => "MEC",
            Programme::Gpa => "GPA",
            Programme::Ti => "TI",
            Programme::Gti => "GTI",
            Programme::Sys => "SYS",
            Programme::Ctn => "CTN",
            Programme::Gol => "GOL",
            Programme::Phy => "PHY",
            Programme::Ate => "ATE",
        }
    }
}

impl fmt::Display for Programme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Programme {
    type Err = UnknownProgramme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Programme::ALL
            .iter()
            .find(|p| p.as_str() == upper)
            .copied()
            .ok_or(UnknownProgramme(upper))
    }
}

/// Returned when a programme tag does not name a known programme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown programme tag: {0}")]
pub struct UnknownProgramme(pub String);

/// Ranking algorithm selector for the search entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bm25,
    Fuzzy,
    Hybrid,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bm25" => Ok(Algorithm::Bm25),
            "fuzzy" => Ok(Algorithm::Fuzzy),
            "hybrid" => Ok(Algorithm::Hybrid),
            other => Err(format!("unknown algorithm: {other}")),
        }
    }
}

/// A ranked search result.
///
/// Scores are finite, non-negative and only comparable within the response
/// that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub code: String,
    pub title: String,
    pub description: String,
    pub credits: Option<u32>,
    pub score: f64,
}

impl SearchHit {
    pub fn from_course(course: &Course, score: f64) -> Self {
        SearchHit {
            code: course.code.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            credits: course.credits,
            score,
        }
    }
}

/// A ranked autocomplete result. Lighter than `SearchHit`: no description.
#[derive(Debug, Clone, Serialize)]
pub struct AutocompleteHit {
    pub code: String,
    pub title: String,
    pub score: f64,
}

impl AutocompleteHit {
    pub fn from_course(course: &Course, score: f64) -> Self {
        AutocompleteHit {
            code: course.code.clone(),
            title: course.title.clone(),
            score,
        }
    }
}
