//! Transcript text and time-coded segments supplied by the fetch service.

use serde::{Deserialize, Serialize};

use crate::metrics::{char_len, word_count};
use crate::timestamp::format_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video in seconds.
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

impl TranscriptSegment {
    /// Segment start rendered as `M:SS` (or `H:MM:SS`).
    pub fn timestamp(&self) -> String {
        format_offset(self.start)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Full concatenated text.
    #[serde(alias = "transcript", alias = "full_text")]
    pub text: String,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptStats {
    pub length: usize,
    pub word_count: usize,
    pub segment_count: usize,
}

impl Transcript {
    pub fn new(text: impl Into<String>, segments: Vec<TranscriptSegment>) -> Self {
        Self {
            text: text.into(),
            segments,
        }
    }

    /// Build a transcript by joining segment texts with single spaces.
    pub fn from_segments(segments: Vec<TranscriptSegment>) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text, segments }
    }

    /// True when there is non-whitespace text to generate from.
    pub fn is_available(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn stats(&self) -> TranscriptStats {
        TranscriptStats {
            length: char_len(&self.text),
            word_count: word_count(&self.text),
            segment_count: self.segments.len(),
        }
    }
}

/// Format a fractional second offset, truncating toward zero.
///
/// Negative and non-finite offsets format as `0:00`.
pub fn format_offset(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor().min(u32::MAX as f64) as u32
    } else {
        0
    };
    format_timestamp(whole)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, start: f64) -> TranscriptSegment {
        TranscriptSegment {
            text: text.to_string(),
            start,
            duration: 2.0,
        }
    }

    #[test]
    fn test_is_available() {
        assert!(!Transcript::default().is_available());
        assert!(!Transcript::new("   \n", vec![]).is_available());
        assert!(Transcript::new("hello", vec![]).is_available());
    }

    #[test]
    fn test_from_segments_joins_text() {
        let transcript =
            Transcript::from_segments(vec![segment("hello there", 0.0), segment("general", 2.5)]);
        assert_eq!(transcript.text, "hello there general");
        let stats = transcript.stats();
        assert_eq!(stats.word_count, 3);
        assert_eq!(stats.segment_count, 2);
        assert_eq!(stats.length, 19);
    }

    #[test]
    fn test_segment_timestamp() {
        assert_eq!(segment("a", 0.0).timestamp(), "0:00");
        assert_eq!(segment("a", 65.9).timestamp(), "1:05");
        assert_eq!(segment("a", 3725.2).timestamp(), "1:02:05");
    }

    #[test]
    fn test_format_offset_degenerate_values() {
        assert_eq!(format_offset(-3.0), "0:00");
        assert_eq!(format_offset(f64::NAN), "0:00");
    }

    #[test]
    fn test_deserialize_fetch_payload() {
        let transcript: Transcript = serde_json::from_value(serde_json::json!({
            "transcript": "hi all",
            "segments": [{"text": "hi all", "start": 0.0, "duration": 1.5}]
        }))
        .unwrap();
        assert_eq!(transcript.text, "hi all");
        assert_eq!(transcript.segments[0].duration, 1.5);
    }
}
