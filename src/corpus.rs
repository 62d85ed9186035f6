//! Corpus ingest and snapshot management.
//!
//! The scraper owns the course data; this module normalizes what it hands
//! over and publishes it as an immutable snapshot. Readers clone an `Arc`
//! under a briefly-held lock and keep scoring against their snapshot even
//! while a refresh installs the next one.

use crate::models::{programme_prefix_of, Course};
use ahash::AHashSet;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse corpus file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can hand the engine a corpus snapshot. The scheduled
/// scraper implements this in production; `CorpusHandle` is the in-memory
/// implementation used by the CLI and the tests.
pub trait CorpusProvider {
    fn get_snapshot(&self) -> Arc<[Course]>;
    fn is_ready(&self) -> bool;
}

/// Canonicalizes scraper output: trims fields, uppercases codes, derives the
/// programme prefix and drops records with duplicate or empty codes.
///
/// First occurrence wins on duplicates; the corpus is ordered by scrape
/// order and earlier records come from fresher catalog pages.
pub fn normalize_courses(courses: Vec<Course>) -> Vec<Course> {
    let mut seen = AHashSet::new();
    let mut normalized = Vec::with_capacity(courses.len());
    for course in courses {
        let code = course.code.trim().to_uppercase();
        if code.is_empty() {
            warn!("dropping course record with empty code");
            continue;
        }
        if !seen.insert(code.clone()) {
            warn!(code = %code, "dropping duplicate course record");
            continue;
        }
        normalized.push(Course {
            programme_prefix: programme_prefix_of(&code),
            code,
            title: course.title.trim().to_string(),
            description: course.description.trim().to_string(),
            credits: course.credits,
        });
    }
    normalized
}

/// Loads and normalizes a JSON corpus file (an array of course records).
pub fn load_courses(path: &Path) -> Result<Vec<Course>, CorpusError> {
    let raw = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let courses: Vec<Course> = serde_json::from_str(&raw).map_err(|source| CorpusError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(normalize_courses(courses))
}

/// Holder of the current corpus snapshot.
///
/// `install` publishes a new immutable snapshot and flips the readiness
/// flag; `get_snapshot` clones the `Arc` so in-flight queries are never
/// invalidated by a refresh. No lock is held while scoring.
pub struct CorpusHandle {
    snapshot: RwLock<Arc<[Course]>>,
    ready: AtomicBool,
}

impl CorpusHandle {
    pub fn new() -> Self {
        CorpusHandle {
            snapshot: RwLock::new(Arc::from(Vec::new())),
            ready: AtomicBool::new(false),
        }
    }

    /// Normalizes and publishes a new snapshot, replacing the previous one.
    pub fn install(&self, courses: Vec<Course>) {
        let normalized = normalize_courses(courses);
        debug!(count = normalized.len(), "installing corpus snapshot");
        let snapshot: Arc<[Course]> = Arc::from(normalized);
        *self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = snapshot;
        self.ready.store(true, Ordering::Release);
    }
}

impl Default for CorpusHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusProvider for CorpusHandle {
    fn get_snapshot(&self) -> Arc<[Course]> {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}
