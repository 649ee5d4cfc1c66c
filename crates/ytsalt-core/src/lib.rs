//! # ytsalt-core
//!
//! Core types, traits, and abstractions for ytSALT metadata reconciliation.
//!
//! This crate provides the canonical metadata record, the suggestion tagged
//! union, the error taxonomy, the payloads of the external fetch service, and
//! the trait seam to the suggestion-generation service. The reconciliation
//! logic itself lives in `ytsalt-reconcile`.

pub mod defaults;
pub mod error;
pub mod events;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod timestamp;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{
    ApplyError, ChapterError, Error, Result, SessionError, TagError, UpstreamFailure,
};
pub use events::{EventBus, SessionEvent, SessionEventEnvelope};
pub use metrics::{DescriptionMetrics, TagMetrics, TitleMetrics};
pub use models::*;
pub use traits::{SuggestionProvider, SuggestionRequest};
