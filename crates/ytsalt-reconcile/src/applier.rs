//! Suggestion application onto the canonical record.
//!
//! Every path is pure with respect to the input record: the caller receives
//! either a fully updated copy or an error, and the original is untouched.

use tracing::{debug, instrument};
use ytsalt_core::{ApplyError, MetadataRecord, Suggestion, SuggestionCategory};

use crate::chapters::ChapterMerger;
use crate::tags::TagReconciler;

/// Dispatches a suggestion onto the field it targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionApplier {
    tags: TagReconciler,
    chapters: ChapterMerger,
}

impl SuggestionApplier {
    pub fn new(tags: TagReconciler) -> Self {
        Self {
            tags,
            chapters: ChapterMerger::new(),
        }
    }

    pub fn tag_reconciler(&self) -> &TagReconciler {
        &self.tags
    }

    /// Apply `suggestion` to a copy of `record`.
    ///
    /// - Title and description replace their field unconditionally.
    /// - Tags go through [`TagReconciler::propose`].
    /// - Chapters go through [`ChapterMerger::merge`] on the description.
    /// - Thumbnail guidance is informational and yields `NotApplicable`.
    #[instrument(skip_all, fields(subsystem = "reconcile", component = "applier", op = "apply", category = %suggestion.category()))]
    pub fn apply(
        &self,
        record: &MetadataRecord,
        suggestion: &Suggestion,
    ) -> Result<MetadataRecord, ApplyError> {
        let updated = match suggestion {
            Suggestion::Title(s) => MetadataRecord {
                title: s.text.clone(),
                ..record.clone()
            },
            Suggestion::Description(s) => MetadataRecord {
                description: s.text.clone(),
                ..record.clone()
            },
            Suggestion::Tag(s) => MetadataRecord {
                tags: self.tags.propose(&record.tags, &s.tag)?,
                ..record.clone()
            },
            Suggestion::Chapter(c) => MetadataRecord {
                description: self.chapters.merge(&record.description, c)?,
                ..record.clone()
            },
            Suggestion::Thumbnail(_) => {
                return Err(ApplyError::NotApplicable(SuggestionCategory::Thumbnail));
            }
        };
        debug!("Suggestion applied");
        Ok(updated)
    }
}

/// Apply `suggestion` to `record` with default limits.
pub fn apply(record: &MetadataRecord, suggestion: &Suggestion) -> Result<MetadataRecord, ApplyError> {
    SuggestionApplier::default().apply(record, suggestion)
}
