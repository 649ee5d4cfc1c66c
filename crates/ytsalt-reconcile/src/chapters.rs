//! Chapter merging for video descriptions.
//!
//! A description may open with a chapter block: timestamp-prefixed lines
//! starting at offset zero (`0:00`, or `00:00`). Merging a new chapter into
//! such a description pulls every chapter line to the top, sorts them by
//! offset, and re-emits the body after a single blank line:
//!
//! ```text
//! 0:00 Start            0:00 Start
//! 5:00 Mid       +      2:15 Setup
//!                2:15   5:00 Mid
//! Body text     Setup
//!                       Body text
//! ```
//!
//! Without an existing block the new chapter is prepended to the untouched
//! description. CRLF descriptions keep CRLF line endings.

use tracing::{debug, instrument, trace};
use ytsalt_core::defaults::CHAPTER_BLOCK_START_SECONDS;
use ytsalt_core::timestamp::{format_timestamp, parse_chapter_line, parse_timestamp};
use ytsalt_core::{ChapterError, ChapterSuggestion};

/// Merges chapter suggestions into description text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChapterMerger;

struct ParsedChapter<'a> {
    seconds: u32,
    line: &'a str,
}

impl ChapterMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merge `chapter` into `description`, returning the rebuilt text.
    ///
    /// The new chapter's timestamp is validated strictly and written back as
    /// `M:SS` (`H:MM:SS` at one hour or more). Its title is collapsed onto a
    /// single line and must not be blank. Chapters sharing a timestamp keep
    /// their insertion order, the new one last.
    #[instrument(skip_all, fields(subsystem = "reconcile", component = "chapter_merger", op = "merge_chapter"))]
    pub fn merge(
        &self,
        description: &str,
        chapter: &ChapterSuggestion,
    ) -> Result<String, ChapterError> {
        let seconds = parse_timestamp(&chapter.timestamp)
            .ok_or_else(|| ChapterError::InvalidTimestamp(chapter.timestamp.clone()))?;
        let title = normalize_title(&chapter.title).ok_or(ChapterError::EmptyTitle)?;
        let new_line = format!("{} {}", format_timestamp(seconds), title);
        let newline = line_ending(description);

        let mut chapters: Vec<ParsedChapter<'_>> = Vec::new();
        let mut body: Vec<&str> = Vec::new();
        for raw in description.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            match parse_chapter_line(line) {
                Some(parsed) => {
                    trace!(seconds = parsed.seconds, line, "Chapter line");
                    chapters.push(ParsedChapter {
                        seconds: parsed.seconds,
                        line,
                    });
                }
                None => body.push(line),
            }
        }

        let has_block = chapters
            .iter()
            .any(|c| c.seconds == CHAPTER_BLOCK_START_SECONDS);
        if !has_block {
            debug!(
                chapter_count = chapters.len(),
                "No chapter block, prepending chapter"
            );
            return Ok(format!("{new_line}{newline}{newline}{description}"));
        }

        chapters.push(ParsedChapter {
            seconds,
            line: &new_line,
        });
        // Stable: equal offsets keep insertion order.
        chapters.sort_by_key(|c| c.seconds);

        let body_start = body
            .iter()
            .position(|line| !line.trim().is_empty())
            .unwrap_or(body.len());
        let body = &body[body_start..];

        debug!(chapter_count = chapters.len(), body_lines = body.len(), "Rebuilt chapter block");

        let mut out = chapters
            .iter()
            .map(|c| c.line)
            .collect::<Vec<_>>()
            .join(newline);
        out.push_str(newline);
        out.push_str(newline);
        out.push_str(&body.join(newline));
        Ok(out)
    }
}

/// Collapse runs of whitespace, line breaks included, to single spaces.
/// `None` when nothing is left.
fn normalize_title(title: &str) -> Option<String> {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

fn line_ending(description: &str) -> &'static str {
    if description.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Merge `chapter` into `description` with the default merger.
pub fn merge_chapter(description: &str, chapter: &ChapterSuggestion) -> Result<String, ChapterError> {
    ChapterMerger::new().merge(description, chapter)
}
