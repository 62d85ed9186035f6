//! Candidate pre-filtering by programme and credit range.
//!
//! Filters run before any scoring so the scorers and the corpus statistics
//! only ever see the restricted slice.

use crate::models::{Course, Programme};

/// Optional restrictions on the candidate set. Every `None` component means
/// "no constraint"; a default-constructed value is a no-op.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Keep courses whose code starts with one of these programme tags.
    /// `Some(vec![])` matches nothing — the caller asked for programmes but
    /// none of them were recognized.
    pub programmes: Option<Vec<Programme>>,
    pub min_credits: Option<u32>,
    pub max_credits: Option<u32>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.programmes.is_none() && self.min_credits.is_none() && self.max_credits.is_none()
    }

    /// Whether a single course survives the filter.
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(programmes) = &self.programmes {
            let code = course.code.trim().to_uppercase();
            if !programmes.iter().any(|p| code.starts_with(p.as_str())) {
                return false;
            }
        }
        if self.min_credits.is_some() || self.max_credits.is_some() {
            // Courses without credit information fail any credit constraint.
            let Some(credits) = course.credits else {
                return false;
            };
            if self.min_credits.is_some_and(|min| credits < min) {
                return false;
            }
            if self.max_credits.is_some_and(|max| credits > max) {
                return false;
            }
        }
        true
    }

    /// Restricts the candidate set. An inconsistent range
    /// (`max_credits < min_credits`) is not an error; it simply matches
    /// nothing.
    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        courses
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }
}
