//! Error types for ytSALT metadata reconciliation.
//!
//! Each concern has its own narrow error enum so callers can match on exactly
//! the outcomes an operation can produce. [`Error`] aggregates all of them for
//! code that crosses concern boundaries.
//!
//! Every kind is recoverable at the session boundary. None of them leave the
//! canonical record partially mutated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SuggestionCategory;

/// Result type alias using ytSALT's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Rejection reasons for a proposed tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The serialized tag list would exceed the platform budget.
    #[error("Tag budget exceeded: {projected} of {budget} characters")]
    BudgetExceeded { projected: usize, budget: usize },

    /// A case-insensitive match of the candidate is already present.
    #[error("Duplicate tag: {0}")]
    DuplicateTag(String),
}

/// Rejection reasons for a chapter merge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChapterError {
    /// Timestamp is not `M:SS`, `MM:SS` or `H:MM:SS`, or a field is out of range.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Title is empty or whitespace only.
    #[error("Chapter title is empty")]
    EmptyTitle,
}

/// Failure to apply a suggestion onto the canonical record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error(transparent)]
    Tag(#[from] TagError),

    #[error(transparent)]
    Chapter(#[from] ChapterError),

    /// Suggestion is informational only (thumbnail guidance).
    #[error("Not applicable: {0} suggestions do not modify the record")]
    NotApplicable(SuggestionCategory),

    /// No ready suggestion exists at the requested position.
    #[error("Suggestion not found at index {0}")]
    SuggestionNotFound(usize),
}

/// Session-level rejections raised before any external request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Category needs a non-empty transcript and none is available.
    #[error("Transcript required for {category} suggestions")]
    PreconditionUnmet { category: SuggestionCategory },
}

/// Error descriptor recorded when the suggestion-generation service fails.
///
/// Stored by the session in its `Failed` state and surfaced to the
/// presentation layer verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Upstream failure: {message}")]
pub struct UpstreamFailure {
    pub message: String,
}

impl UpstreamFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Core error type for ytSALT operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Tag(#[from] TagError),

    #[error(transparent)]
    Chapter(#[from] ChapterError),

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Suggestion-generation service returned an error or was unreachable
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<UpstreamFailure> for Error {
    fn from(f: UpstreamFailure) -> Self {
        Error::Upstream(f.message)
    }
}

impl From<&Error> for UpstreamFailure {
    fn from(e: &Error) -> Self {
        match e {
            Error::Upstream(message) => UpstreamFailure::new(message.clone()),
            other => UpstreamFailure::new(other.to_string()),
        }
    }
}
