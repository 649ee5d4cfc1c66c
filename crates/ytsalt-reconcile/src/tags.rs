//! Tag reconciliation against the platform's tag budget.
//!
//! ## Budget accounting
//!
//! The projected length is the serialized length of the current list (entries
//! joined with a single separator character) plus the candidate's length,
//! the same accounting the platform applies. Lengths are counted in Unicode
//! scalar values.
//!
//! ## Check order
//!
//! 1. Budget (`BudgetExceeded`)
//! 2. Case-insensitive duplicate (`DuplicateTag`)
//!
//! The candidate's original casing is preserved on insert and existing
//! entries are never reordered.

use tracing::{debug, warn};
use ytsalt_core::defaults::TAG_BUDGET;
use ytsalt_core::metrics::char_len;
use ytsalt_core::{serialized_tags_len, TagError};

/// Applies proposed tags to a tag list under dedup and budget rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagReconciler {
    budget: usize,
}

impl Default for TagReconciler {
    fn default() -> Self {
        Self::new(TAG_BUDGET)
    }
}

impl TagReconciler {
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Serialized length after appending `candidate` to `current`.
    pub fn projected_length(current: &[String], candidate: &str) -> usize {
        serialized_tags_len(current) + char_len(candidate)
    }

    /// Return `current` with `candidate` appended, or the reason it was refused.
    ///
    /// `current` is never modified.
    pub fn propose(&self, current: &[String], candidate: &str) -> Result<Vec<String>, TagError> {
        let projected = Self::projected_length(current, candidate);
        if projected > self.budget {
            warn!(
                subsystem = "reconcile",
                component = "tag_reconciler",
                op = "propose_tag",
                projected_len = projected,
                budget = self.budget,
                "Tag rejected: budget exceeded"
            );
            return Err(TagError::BudgetExceeded {
                projected,
                budget: self.budget,
            });
        }

        let lowered = candidate.to_lowercase();
        if current.iter().any(|t| t.to_lowercase() == lowered) {
            warn!(
                subsystem = "reconcile",
                component = "tag_reconciler",
                op = "propose_tag",
                tag = candidate,
                "Tag rejected: duplicate"
            );
            return Err(TagError::DuplicateTag(candidate.to_string()));
        }

        let mut tags = Vec::with_capacity(current.len() + 1);
        tags.extend_from_slice(current);
        tags.push(candidate.to_string());
        debug!(
            subsystem = "reconcile",
            component = "tag_reconciler",
            tag_count = tags.len(),
            projected_len = projected,
            "Tag appended"
        );
        Ok(tags)
    }
}

/// Propose `candidate` against the default 500-character budget.
pub fn propose_tag(current: &[String], candidate: &str) -> Result<Vec<String>, TagError> {
    TagReconciler::default().propose(current, candidate)
}
