//! Presentation metrics attached to suggestions.
//!
//! Metrics are guidance only. The reconciliation engine never rejects a
//! suggestion because of them; title and description length limits are
//! enforced by the platform, not here.

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DESCRIPTION_CHAR_LIMIT, TAG_RECOMMENDED_MAX, TAG_RECOMMENDED_MIN, TITLE_CHAR_LIMIT,
    TITLE_RECOMMENDED_MAX, TITLE_RECOMMENDED_MIN,
};

/// Length measured in Unicode scalar values.
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Whitespace-separated word count.
#[inline]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleMetrics {
    pub length: usize,
    pub word_count: usize,
    pub recommended: bool,
    #[serde(default)]
    pub has_number: bool,
    #[serde(default)]
    pub character_limit_ok: bool,
}

impl TitleMetrics {
    pub fn analyze(title: &str) -> Self {
        let length = char_len(title);
        Self {
            length,
            word_count: word_count(title),
            recommended: (TITLE_RECOMMENDED_MIN..=TITLE_RECOMMENDED_MAX).contains(&length),
            has_number: title.chars().any(|c| c.is_ascii_digit()),
            character_limit_ok: length <= TITLE_CHAR_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionMetrics {
    pub word_count: usize,
    pub line_count: usize,
    pub has_hashtags: bool,
    pub has_links: bool,
    #[serde(default)]
    pub length: usize,
    #[serde(default)]
    pub character_limit_ok: bool,
}

impl DescriptionMetrics {
    /// An empty description reports zero lines rather than one.
    pub fn analyze(description: &str) -> Self {
        if description.is_empty() {
            return Self {
                character_limit_ok: true,
                ..Self::default()
            };
        }

        let lowered = description.to_lowercase();
        let length = char_len(description);
        Self {
            word_count: word_count(description),
            line_count: description.split('\n').count(),
            has_hashtags: description.contains('#'),
            has_links: lowered.contains("http") || lowered.contains("www."),
            length,
            character_limit_ok: length <= DESCRIPTION_CHAR_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMetrics {
    pub length: usize,
    pub is_recommended_length: bool,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub has_numbers: bool,
}

impl TagMetrics {
    pub fn analyze(tag: &str) -> Self {
        let length = char_len(tag);
        Self {
            length,
            is_recommended_length: (TAG_RECOMMENDED_MIN..=TAG_RECOMMENDED_MAX).contains(&length),
            word_count: word_count(tag),
            has_numbers: tag.chars().any(|c| c.is_ascii_digit()),
        }
    }
}
