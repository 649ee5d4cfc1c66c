//! Suggestion tagged union and generation-service intake.
//!
//! Suggestions are produced by the external generation service and are
//! read-only inputs to the reconciliation engine. One variant exists per
//! category; consumers dispatch with an exhaustive `match`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::defaults::UPSTREAM_FALLBACK_MESSAGE;
use crate::error::{Error, Result, UpstreamFailure};
use crate::metrics::{DescriptionMetrics, TagMetrics, TitleMetrics};
use crate::models::SuggestionCategory;

// =============================================================================
// VARIANTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSuggestion {
    #[serde(alias = "title")]
    pub text: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub metrics: TitleMetrics,
}

impl TitleSuggestion {
    pub fn new(text: impl Into<String>, reasoning: impl Into<String>) -> Self {
        let text = text.into();
        let metrics = TitleMetrics::analyze(&text);
        Self {
            text,
            reasoning: reasoning.into(),
            metrics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionSuggestion {
    #[serde(alias = "description")]
    pub text: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub metrics: DescriptionMetrics,
}

impl DescriptionSuggestion {
    pub fn new(text: impl Into<String>, reasoning: impl Into<String>) -> Self {
        let text = text.into();
        let metrics = DescriptionMetrics::analyze(&text);
        Self {
            text,
            reasoning: reasoning.into(),
            metrics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSuggestion {
    pub tag: String,
    #[serde(default)]
    pub reasoning: String,
    /// Free-form grouping such as "primary keyword", "long-tail", "trending".
    #[serde(default)]
    pub category: String,
    /// Where the tag came from: "metadata", "transcript" or "both".
    #[serde(default)]
    pub source: String,
    /// Not found among the record's existing keywords.
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub metrics: TagMetrics,
}

impl TagSuggestion {
    pub fn new(tag: impl Into<String>, reasoning: impl Into<String>) -> Self {
        let tag = tag.into();
        let metrics = TagMetrics::analyze(&tag);
        Self {
            tag,
            reasoning: reasoning.into(),
            category: String::new(),
            source: String::new(),
            is_new: false,
            metrics,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_is_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSuggestion {
    pub timestamp: String,
    pub title: String,
}

impl ChapterSuggestion {
    pub fn new(timestamp: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            title: title.into(),
        }
    }
}

/// Thumbnail advice keyed by section name ("composition", "text overlay", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailGuidance {
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
    #[serde(default)]
    pub current_analysis: Option<String>,
}

// =============================================================================
// SUGGESTION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    Title(TitleSuggestion),
    Description(DescriptionSuggestion),
    Tag(TagSuggestion),
    Chapter(ChapterSuggestion),
    Thumbnail(ThumbnailGuidance),
}

impl Suggestion {
    pub fn category(&self) -> SuggestionCategory {
        match self {
            Self::Title(_) => SuggestionCategory::Title,
            Self::Description(_) => SuggestionCategory::Description,
            Self::Tag(_) => SuggestionCategory::Tags,
            Self::Chapter(_) => SuggestionCategory::KeyMoments,
            Self::Thumbnail(_) => SuggestionCategory::Thumbnail,
        }
    }

    /// Recompute metrics from the suggestion's own text.
    pub fn refresh_metrics(&mut self) {
        match self {
            Self::Title(s) => s.metrics = TitleMetrics::analyze(&s.text),
            Self::Description(s) => s.metrics = DescriptionMetrics::analyze(&s.text),
            Self::Tag(s) => s.metrics = TagMetrics::analyze(&s.tag),
            Self::Chapter(_) | Self::Thumbnail(_) => {}
        }
    }

    /// Decode one element of a generation-service response for `category`.
    ///
    /// Elements carry category-specific keys (`title`, `description`, `tag`,
    /// `timestamp`/`title`, `sections`). Metrics missing from the element are
    /// computed locally.
    pub fn from_category_value(category: SuggestionCategory, value: JsonValue) -> Result<Self> {
        let JsonValue::Object(mut object) = value else {
            return Err(Error::Serialization(format!(
                "{} suggestion must be a JSON object",
                category
            )));
        };
        let has_metrics = object.contains_key("metrics");
        object.insert(
            "kind".to_string(),
            JsonValue::String(variant_tag(category).to_string()),
        );

        let mut suggestion: Suggestion = serde_json::from_value(JsonValue::Object(object))?;
        if !has_metrics {
            suggestion.refresh_metrics();
        }
        Ok(suggestion)
    }
}

fn variant_tag(category: SuggestionCategory) -> &'static str {
    match category {
        SuggestionCategory::Title => "title",
        SuggestionCategory::Description => "description",
        SuggestionCategory::Tags => "tag",
        SuggestionCategory::Thumbnail => "thumbnail",
        SuggestionCategory::KeyMoments => "chapter",
    }
}

// =============================================================================
// INTAKE
// =============================================================================

/// Response envelope returned by the suggestion-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionEnvelope {
    pub success: bool,
    #[serde(default)]
    pub suggestions: Vec<JsonValue>,
    #[serde(default)]
    pub error: Option<String>,
    /// Raw model output, kept for display.
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl SuggestionEnvelope {
    /// Convert the envelope into typed suggestions for `category`.
    ///
    /// Elements that fail to decode are skipped with a warning. An envelope
    /// reporting `success: false` becomes an [`UpstreamFailure`].
    pub fn into_suggestions(
        self,
        category: SuggestionCategory,
    ) -> std::result::Result<Vec<Suggestion>, UpstreamFailure> {
        if !self.success {
            let message = self
                .error
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string());
            return Err(UpstreamFailure::new(message));
        }

        let mut suggestions = Vec::with_capacity(self.suggestions.len());
        for (index, value) in self.suggestions.into_iter().enumerate() {
            match Suggestion::from_category_value(category, value) {
                Ok(suggestion) => suggestions.push(suggestion),
                Err(e) => warn!(
                    subsystem = "intake",
                    component = "envelope",
                    %category,
                    index,
                    error = %e,
                    "Skipping malformed suggestion"
                ),
            }
        }
        Ok(suggestions)
    }
}
