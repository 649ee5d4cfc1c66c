//! Centralized default constants for ytSALT.
//!
//! **This module is the single source of truth** for platform limits and
//! metric thresholds. Other modules and crates reference these constants
//! instead of defining their own magic numbers.

// =============================================================================
// TAGS
// =============================================================================

/// Maximum serialized (comma-joined) length of a video's tag list.
pub const TAG_BUDGET: usize = 500;

/// Characters contributed by the separator between two serialized tags.
pub const TAG_SEPARATOR_LEN: usize = 1;

/// Separator used when serializing tags for budget accounting.
pub const TAG_SEPARATOR: char = ',';

/// Shortest tag length flagged as recommended.
pub const TAG_RECOMMENDED_MIN: usize = 10;

/// Longest tag length flagged as recommended.
pub const TAG_RECOMMENDED_MAX: usize = 30;

// =============================================================================
// TITLES
// =============================================================================

/// Platform title length limit used for `character_limit_ok`.
pub const TITLE_CHAR_LIMIT: usize = 70;

/// Shortest title length flagged as recommended.
pub const TITLE_RECOMMENDED_MIN: usize = 30;

/// Longest title length flagged as recommended.
pub const TITLE_RECOMMENDED_MAX: usize = 70;

// =============================================================================
// DESCRIPTIONS
// =============================================================================

/// Platform description length limit used for `character_limit_ok`.
pub const DESCRIPTION_CHAR_LIMIT: usize = 5000;

// =============================================================================
// CHAPTERS
// =============================================================================

/// Offset in seconds of the chapter that opens a block (`0:00`, `00:00`).
pub const CHAPTER_BLOCK_START_SECONDS: u32 = 0;

// =============================================================================
// SESSION
// =============================================================================

/// Broadcast buffer capacity for session events.
///
/// Recommended: 256 for production, 32 for tests.
pub const EVENT_CAPACITY: usize = 256;

/// Message recorded when the generation service fails without one.
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to generate suggestions";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_spans_are_ordered() {
        assert!(TAG_RECOMMENDED_MIN < TAG_RECOMMENDED_MAX);
        assert!(TITLE_RECOMMENDED_MIN < TITLE_RECOMMENDED_MAX);
        assert!(TITLE_RECOMMENDED_MAX <= TITLE_CHAR_LIMIT);
    }

    #[test]
    fn test_separator_len_matches_separator() {
        assert_eq!(TAG_SEPARATOR.len_utf8(), TAG_SEPARATOR_LEN);
    }
}
