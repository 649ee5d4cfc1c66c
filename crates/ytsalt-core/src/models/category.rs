//! Suggestion categories.

use serde::{Deserialize, Serialize};

/// A metadata field family the generation service can produce suggestions for.
///
/// A session with no active category is represented as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Title,
    Description,
    Tags,
    Thumbnail,
    /// Chapter markers derived from the transcript.
    KeyMoments,
}

impl SuggestionCategory {
    /// All categories in presentation order.
    pub const ALL: [SuggestionCategory; 5] = [
        Self::Title,
        Self::Description,
        Self::Tags,
        Self::Thumbnail,
        Self::KeyMoments,
    ];

    /// Categories whose generation reads the transcript.
    pub fn requires_transcript(&self) -> bool {
        matches!(self, Self::Tags | Self::KeyMoments)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::Thumbnail => "thumbnail",
            Self::KeyMoments => "key_moments",
        }
    }
}

impl std::fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SuggestionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "tags" | "tag" => Ok(Self::Tags),
            "thumbnail" => Ok(Self::Thumbnail),
            "key_moments" | "keymoments" | "chapters" => Ok(Self::KeyMoments),
            _ => Err(format!("Invalid suggestion category: {}", s)),
        }
    }
}
