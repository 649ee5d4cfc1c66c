//! Chapter timestamp recognition and formatting.
//!
//! A chapter line is one or two digits, a colon, two digits, an optional
//! second `:SS` group, then whitespace and a label:
//!
//! ```text
//! 0:00 Intro
//! 12:30 Deep dive
//! 1:02:03 Outro
//! ```
//!
//! Recognition is lenient about field ranges so that existing descriptions
//! always sort. [`parse_timestamp`] is strict and is used for new input.

use once_cell::sync::Lazy;
use regex::Regex;

static CHAPTER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?\s+(\S.*)$").expect("chapter line pattern")
});

static TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("timestamp pattern"));

/// A description line recognized as a chapter marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterLine<'a> {
    /// The full original line.
    pub line: &'a str,
    /// Offset from the start of the video in seconds.
    pub seconds: u32,
    /// Text following the timestamp.
    pub label: &'a str,
}

/// Recognize a chapter line and compute its offset.
///
/// Two-field form is `minutes*60 + seconds`; three-field form is
/// `hours*3600 + minutes*60 + seconds`.
pub fn parse_chapter_line(line: &str) -> Option<ChapterLine<'_>> {
    let caps = CHAPTER_LINE.captures(line)?;
    let first: u32 = caps.get(1)?.as_str().parse().ok()?;
    let second: u32 = caps.get(2)?.as_str().parse().ok()?;
    let seconds = match caps.get(3) {
        Some(third) => {
            let third: u32 = third.as_str().parse().ok()?;
            first * 3600 + second * 60 + third
        }
        None => first * 60 + second,
    };
    let label = caps.get(4)?.as_str();

    Some(ChapterLine {
        line,
        seconds,
        label,
    })
}

/// Returns true if the line would be recognized as a chapter marker.
pub fn is_chapter_line(line: &str) -> bool {
    CHAPTER_LINE.is_match(line)
}

/// Parse a bare timestamp strictly into total seconds.
///
/// Rejects malformed text, seconds >= 60, and minutes >= 60 in the hour form.
pub fn parse_timestamp(timestamp: &str) -> Option<u32> {
    let caps = TIMESTAMP.captures(timestamp.trim())?;
    let first: u32 = caps.get(1)?.as_str().parse().ok()?;
    let second: u32 = caps.get(2)?.as_str().parse().ok()?;

    match caps.get(3) {
        Some(third) => {
            let third: u32 = third.as_str().parse().ok()?;
            if second >= 60 || third >= 60 {
                return None;
            }
            Some(first * 3600 + second * 60 + third)
        }
        None => {
            if second >= 60 {
                return None;
            }
            Some(first * 60 + second)
        }
    }
}

/// Format seconds as `M:SS`, or `H:MM:SS` once the offset reaches one hour.
pub fn format_timestamp(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chapter_line_minutes_seconds() {
        let chapter = parse_chapter_line("5:00 Mid").unwrap();
        assert_eq!(chapter.seconds, 300);
        assert_eq!(chapter.label, "Mid");
        assert_eq!(chapter.line, "5:00 Mid");
    }

    #[test]
    fn test_parse_chapter_line_two_digit_minutes() {
        let chapter = parse_chapter_line("12:34 Deep dive").unwrap();
        assert_eq!(chapter.seconds, 12 * 60 + 34);
        assert_eq!(chapter.label, "Deep dive");
    }

    #[test]
    fn test_parse_chapter_line_hour_form() {
        let chapter = parse_chapter_line("1:02:03 Outro").unwrap();
        assert_eq!(chapter.seconds, 3600 + 2 * 60 + 3);
        assert_eq!(chapter.label, "Outro");
    }

    #[test]
    fn test_parse_chapter_line_rejects_body_text() {
        assert!(parse_chapter_line("Body text").is_none());
        assert!(parse_chapter_line("").is_none());
        assert!(parse_chapter_line("0:00").is_none());
        assert!(parse_chapter_line("0:00 ").is_none());
        assert!(parse_chapter_line("123:00 Too many digits").is_none());
        assert!(parse_chapter_line("1:5 Single digit seconds").is_none());
        assert!(parse_chapter_line(" 0:00 Indented").is_none());
    }

    #[test]
    fn test_parse_chapter_line_is_lenient_about_ranges() {
        let chapter = parse_chapter_line("1:75 Odd").unwrap();
        assert_eq!(chapter.seconds, 135);
    }

    #[test]
    fn test_is_chapter_line_tab_separator() {
        assert!(is_chapter_line("0:00\tStart"));
    }

    #[test]
    fn test_parse_timestamp_valid() {
        assert_eq!(parse_timestamp("0:00"), Some(0));
        assert_eq!(parse_timestamp("1:30"), Some(90));
        assert_eq!(parse_timestamp("01:30"), Some(90));
        assert_eq!(parse_timestamp("59:59"), Some(3599));
        assert_eq!(parse_timestamp("1:00:00"), Some(3600));
        assert_eq!(parse_timestamp(" 2:15 "), Some(135));
    }

    #[test]
    fn test_parse_timestamp_rejects_out_of_range() {
        assert_eq!(parse_timestamp("1:60"), None);
        assert_eq!(parse_timestamp("1:75"), None);
        assert_eq!(parse_timestamp("1:60:00"), None);
        assert_eq!(parse_timestamp("1:00:60"), None);
    }

    #[test]
    fn test_parse_timestamp_rejects_malformed() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("90"), None);
        assert_eq!(parse_timestamp("1:5"), None);
        assert_eq!(parse_timestamp("a:bc"), None);
        assert_eq!(parse_timestamp("1:30 Intro"), None);
        assert_eq!(parse_timestamp("-1:30"), None);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "0:00");
        assert_eq!(format_timestamp(90), "1:30");
        assert_eq!(format_timestamp(3599), "59:59");
        assert_eq!(format_timestamp(3600), "1:00:00");
        assert_eq!(format_timestamp(3723), "1:02:03");
    }

    #[test]
    fn test_format_parse_agree_below_one_hour() {
        for seconds in [0, 5, 59, 60, 61, 600, 3599] {
            assert_eq!(parse_timestamp(&format_timestamp(seconds)), Some(seconds));
        }
    }
}
