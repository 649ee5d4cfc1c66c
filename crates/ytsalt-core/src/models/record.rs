//! The canonical metadata record and its source payload.

use serde::{Deserialize, Serialize};

use crate::defaults::{CHAPTER_BLOCK_START_SECONDS, TAG_SEPARATOR, TAG_SEPARATOR_LEN};
use crate::metrics::{char_len, word_count};
use crate::timestamp::parse_chapter_line;

/// Video metadata as returned by the external fetch service.
///
/// Only title, description, tags and thumbnail reach the canonical record;
/// the remaining fields are carried for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
    /// Duration in seconds.
    pub duration: Option<u64>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub channel: Option<String>,
    /// Upload date as `YYYYMMDD`.
    pub upload_date: Option<String>,
}

/// The single authoritative metadata object a session operates on.
///
/// Invariants held by every mutation path:
/// - no two tags are equal under case-insensitive comparison;
/// - the comma-joined tag list stays within the tag budget;
/// - chapter lines form one contiguous, ascending block at the top of the
///   description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub thumbnail_ref: Option<String>,
}

/// Tag list accounting against a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStats {
    pub count: usize,
    pub serialized_length: usize,
    pub remaining: usize,
}

/// Length and word count of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub length: usize,
    pub word_count: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            length: char_len(text),
            word_count: word_count(text),
        }
    }
}

/// A broken record invariant, reported by [`MetadataRecord::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two tags collide case-insensitively.
    DuplicateTag { first: String, second: String },
    /// The comma-joined tag list is longer than the budget.
    TagBudget { serialized_length: usize, budget: usize },
    /// Chapter lines are interrupted by body text.
    ChaptersNotContiguous,
    /// Chapter lines do not start the description.
    ChaptersNotLeading,
    /// Chapter timestamps are not strictly ascending.
    ChaptersOutOfOrder { line: String },
}

/// Serialized length of a tag list: entry lengths plus one separator between entries.
pub fn serialized_tags_len(tags: &[String]) -> usize {
    let chars: usize = tags.iter().map(|t| char_len(t)).sum();
    chars + tags.len().saturating_sub(1) * TAG_SEPARATOR_LEN
}

impl MetadataRecord {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
        thumbnail_ref: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags,
            thumbnail_ref,
        }
    }

    pub fn from_source(source: SourceMetadata) -> Self {
        Self {
            title: source.title,
            description: source.description,
            tags: source.tags,
            thumbnail_ref: source.thumbnail_url,
        }
    }

    /// Comma-joined tag list, the form the platform budgets against.
    pub fn serialized_tags(&self) -> String {
        let mut out = String::new();
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                out.push(TAG_SEPARATOR);
            }
            out.push_str(tag);
        }
        out
    }

    pub fn tag_stats(&self, budget: usize) -> TagStats {
        let serialized_length = serialized_tags_len(&self.tags);
        TagStats {
            count: self.tags.len(),
            serialized_length,
            remaining: budget.saturating_sub(serialized_length),
        }
    }

    pub fn title_stats(&self) -> TextStats {
        TextStats::of(&self.title)
    }

    pub fn description_stats(&self) -> TextStats {
        TextStats::of(&self.description)
    }

    /// Whether the description has a chapter block (a chapter at offset zero).
    pub fn has_chapter_block(&self) -> bool {
        self.description
            .split('\n')
            .filter_map(parse_chapter_line)
            .any(|c| c.seconds == CHAPTER_BLOCK_START_SECONDS)
    }

    /// Report every broken invariant. An empty list means the record is valid.
    pub fn check_invariants(&self, budget: usize) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        for (i, first) in self.tags.iter().enumerate() {
            let lowered = first.to_lowercase();
            if let Some(second) = self.tags[i + 1..]
                .iter()
                .find(|t| t.to_lowercase() == lowered)
            {
                violations.push(InvariantViolation::DuplicateTag {
                    first: first.clone(),
                    second: second.clone(),
                });
            }
        }

        let serialized_length = serialized_tags_len(&self.tags);
        if serialized_length > budget {
            violations.push(InvariantViolation::TagBudget {
                serialized_length,
                budget,
            });
        }

        self.check_chapter_block(&mut violations);
        violations
    }

    fn check_chapter_block(&self, violations: &mut Vec<InvariantViolation>) {
        let lines: Vec<&str> = self.description.split('\n').collect();
        let positions: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| parse_chapter_line(line).is_some())
            .map(|(i, _)| i)
            .collect();

        let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
            return;
        };

        if first != 0 {
            violations.push(InvariantViolation::ChaptersNotLeading);
        }
        if last - first + 1 != positions.len() {
            violations.push(InvariantViolation::ChaptersNotContiguous);
        }

        let mut previous: Option<u32> = None;
        for &i in &positions {
            if let Some(chapter) = parse_chapter_line(lines[i]) {
                if previous.is_some_and(|p| chapter.seconds <= p) {
                    violations.push(InvariantViolation::ChaptersOutOfOrder {
                        line: lines[i].to_string(),
                    });
                }
                previous = Some(chapter.seconds);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::TAG_BUDGET;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_serialized_tags_len() {
        assert_eq!(serialized_tags_len(&[]), 0);
        assert_eq!(serialized_tags_len(&tags(&["cats"])), 4);
        assert_eq!(serialized_tags_len(&tags(&["cats", "Dogs"])), 9);
    }

    #[test]
    fn test_serialized_tags_matches_len() {
        let record = MetadataRecord::new("t", "d", tags(&["a", "bb", "ccc"]), None);
        assert_eq!(record.serialized_tags(), "a,bb,ccc");
        assert_eq!(
            record.serialized_tags().chars().count(),
            serialized_tags_len(&record.tags)
        );
    }

    #[test]
    fn test_tag_stats() {
        let record = MetadataRecord::new("t", "d", tags(&["cats", "Dogs"]), None);
        let stats = record.tag_stats(TAG_BUDGET);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.serialized_length, 9);
        assert_eq!(stats.remaining, 491);
    }

    #[test]
    fn test_text_stats() {
        let record = MetadataRecord::new("My Cat Video", "One two\nthree", vec![], None);
        assert_eq!(
            record.title_stats(),
            TextStats {
                length: 12,
                word_count: 3
            }
        );
        assert_eq!(record.description_stats().word_count, 3);
    }

    #[test]
    fn test_from_source_payload() {
        let source: SourceMetadata = serde_json::from_value(serde_json::json!({
            "title": "Cats",
            "description": "All about cats",
            "tags": ["cats", "pets"],
            "thumbnail_url": "https://i.ytimg.com/vi/abc/maxresdefault.jpg",
            "duration": 615,
            "view_count": 1200,
            "channel": "Cat Channel",
            "upload_date": "20250214"
        }))
        .unwrap();
        assert_eq!(source.duration, Some(615));
        assert!(source.like_count.is_none());

        let record = MetadataRecord::from_source(source);
        assert_eq!(record.title, "Cats");
        assert_eq!(record.tags, tags(&["cats", "pets"]));
        assert_eq!(
            record.thumbnail_ref.as_deref(),
            Some("https://i.ytimg.com/vi/abc/maxresdefault.jpg")
        );
    }

    #[test]
    fn test_from_source_missing_fields_default() {
        let source: SourceMetadata = serde_json::from_str(r#"{"title": "Only title"}"#).unwrap();
        let record = MetadataRecord::from_source(source);
        assert!(record.description.is_empty());
        assert!(record.tags.is_empty());
        assert!(record.thumbnail_ref.is_none());
    }

    #[test]
    fn test_has_chapter_block() {
        let with = MetadataRecord::new("t", "0:00 Intro\n1:00 Next\n\nBody", vec![], None);
        assert!(with.has_chapter_block());

        let without = MetadataRecord::new("t", "1:00 Next\nBody", vec![], None);
        assert!(!without.has_chapter_block());
    }

    #[test]
    fn test_has_chapter_block_zero_padded() {
        let padded = MetadataRecord::new("t", "00:00 Intro\n05:00 Mid\n\nBody", vec![], None);
        assert!(padded.has_chapter_block());
        assert!(padded.check_invariants(500).is_empty());
    }

    #[test]
    fn test_check_invariants_valid_record() {
        let record = MetadataRecord::new(
            "t",
            "0:00 Start\n2:15 Setup\n5:00 Mid\n\nBody text",
            tags(&["cats", "Dogs"]),
            None,
        );
        assert!(record.check_invariants(TAG_BUDGET).is_empty());
    }

    #[test]
    fn test_check_invariants_duplicate_tags() {
        let record = MetadataRecord::new("t", "", tags(&["cats", "Dogs", "DOGS"]), None);
        let violations = record.check_invariants(TAG_BUDGET);
        assert_eq!(
            violations,
            vec![InvariantViolation::DuplicateTag {
                first: "Dogs".to_string(),
                second: "DOGS".to_string()
            }]
        );
    }

    #[test]
    fn test_check_invariants_budget() {
        let record = MetadataRecord::new("t", "", vec!["x".repeat(501)], None);
        assert_eq!(
            record.check_invariants(TAG_BUDGET),
            vec![InvariantViolation::TagBudget {
                serialized_length: 501,
                budget: TAG_BUDGET
            }]
        );
    }

    #[test]
    fn test_check_invariants_chapter_layout() {
        let not_leading = MetadataRecord::new("t", "Intro text\n0:00 Start", vec![], None);
        assert!(not_leading
            .check_invariants(TAG_BUDGET)
            .contains(&InvariantViolation::ChaptersNotLeading));

        let split = MetadataRecord::new("t", "0:00 Start\nBody\n5:00 Later", vec![], None);
        assert!(split
            .check_invariants(TAG_BUDGET)
            .contains(&InvariantViolation::ChaptersNotContiguous));

        let unordered = MetadataRecord::new("t", "0:00 Start\n5:00 Mid\n2:15 Setup", vec![], None);
        assert_eq!(
            unordered.check_invariants(TAG_BUDGET),
            vec![InvariantViolation::ChaptersOutOfOrder {
                line: "2:15 Setup".to_string()
            }]
        );
    }
}
