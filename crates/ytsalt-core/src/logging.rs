//! Structured logging schema and field name constants for ytSALT.
//!
//! All crates use these constants for consistent structured logging fields.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | WARN  | Local rejection recovered by the caller (budget, duplicate, stale response, missing transcript) |
//! | INFO  | Session lifecycle (optimization started, ready, failed, cleared), accepted applies |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-line chapter parsing |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "session", "reconcile", "intake", "events"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "tag_reconciler", "chapter_merger", "applier", "driver"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "propose_tag", "merge_chapter", "apply", "start_category"
pub const OPERATION: &str = "op";

/// Session UUID (UUIDv7).
pub const SESSION_ID: &str = "session_id";

/// Request ticket UUID (UUIDv7) for an in-flight optimization.
pub const REQUEST_ID: &str = "request_id";

// ─── Domain fields ─────────────────────────────────────────────────────────

/// Suggestion category (`title`, `description`, `tags`, `thumbnail`, `key_moments`).
pub const CATEGORY: &str = "category";

/// Number of suggestions delivered for a category.
pub const SUGGESTION_COUNT: &str = "suggestion_count";

/// Number of tags on the record.
pub const TAG_COUNT: &str = "tag_count";

/// Serialized tag length after a proposed insert.
pub const PROJECTED_LEN: &str = "projected_len";

/// Number of chapter lines recognized in a description.
pub const CHAPTER_COUNT: &str = "chapter_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Response arrived after its request was superseded.
pub const STALE: &str = "stale";
