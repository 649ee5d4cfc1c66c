//! Seams to the external collaborators of the reconciliation engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{MetadataRecord, Suggestion, SuggestionCategory, Transcript};

/// Snapshot handed to the suggestion-generation service for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Ticket id of the in-flight optimization (UUIDv7).
    pub request_id: Uuid,
    pub category: SuggestionCategory,
    pub record: MetadataRecord,
    /// Present only when the session holds a transcript.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcript>,
}

/// External suggestion-generation service.
///
/// How suggestions are produced is opaque to the engine. Errors returned here
/// are recorded as an upstream failure on the session, never propagated as a
/// crash.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Produce suggestions for `request.category`.
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Suggestion>>;
}
