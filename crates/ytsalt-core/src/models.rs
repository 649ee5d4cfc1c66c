//! Data model shared across ytSALT crates.

pub mod category;
pub mod record;
pub mod suggestion;
pub mod transcript;

pub use category::SuggestionCategory;
pub use record::{
    serialized_tags_len, InvariantViolation, MetadataRecord, SourceMetadata, TagStats, TextStats,
};
pub use suggestion::{
    ChapterSuggestion, DescriptionSuggestion, Suggestion, SuggestionEnvelope, TagSuggestion,
    ThumbnailGuidance, TitleSuggestion,
};
pub use transcript::{format_offset, Transcript, TranscriptSegment, TranscriptStats};
