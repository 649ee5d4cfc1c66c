//! # ytsalt-reconcile
//!
//! Metadata reconciliation engine for ytSALT.
//!
//! Merges externally generated suggestions into the canonical
//! [`MetadataRecord`](ytsalt_core::MetadataRecord) while holding its
//! invariants: unique tags within the tag budget, and a single sorted chapter
//! block at the top of the description.
//!
//! - [`tags`]: tag dedup and budget accounting
//! - [`chapters`]: chapter block merge
//! - [`applier`]: suggestion dispatch onto the record
//! - [`session`]: optimization state machine with stale-response guard
//! - [`driver`]: async round trip through a [`SuggestionProvider`](ytsalt_core::SuggestionProvider)
//! - [`config`]: environment-driven limits

pub mod applier;
pub mod chapters;
pub mod config;
pub mod driver;
pub mod session;
pub mod tags;

pub use applier::SuggestionApplier;
pub use chapters::{merge_chapter, ChapterMerger};
pub use config::ReconcileConfig;
pub use driver::{optimize, shared, SharedSession};
pub use session::{OptimizationSession, RequestTicket, Resolution, SessionStatus};
pub use tags::{propose_tag, TagReconciler};
