use serde::{Deserialize, Serialize};

pub mod cost;
pub mod recommendation;
pub mod survey;

pub use cost::{
    AccommodationType, BudgetLevel, CostQuote, CostRequest, CostResponse, SpendingLevel,
};
pub use recommendation::{Recommendation, RecommendationSet, MAX_RECOMMENDATIONS};
pub use survey::{SurveyAnswer, SurveyInput, TripParameters};

// ============================================================================
// Video Search Types
// ============================================================================

/// A travel video returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub channel: String,
    pub published_at: String,
}

/// Raw search response from the YouTube Data API
#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeSearchResponse {
    #[serde(default)]
    pub items: Vec<YoutubeItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeItem {
    pub id: YoutubeItemId,
    pub snippet: YoutubeSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: std::collections::HashMap<String, YoutubeThumbnail>,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub published_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeThumbnail {
    pub url: String,
}

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

impl YoutubeItem {
    /// Converts a search item, `None` for results that are not videos
    pub fn into_video(self) -> Option<Video> {
        let id = self.id.video_id?;
        let snippet = self.snippet;

        let description = if snippet.description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
            let preview: String = snippet
                .description
                .chars()
                .take(DESCRIPTION_PREVIEW_CHARS)
                .collect();
            format!("{}...", preview)
        } else {
            snippet.description
        };

        let thumbnail = snippet
            .thumbnails
            .get("medium")
            .map(|t| t.url.clone())
            .unwrap_or_default();

        Some(Video {
            url: format!("https://www.youtube.com/watch?v={}", id),
            id,
            title: snippet.title,
            description,
            thumbnail,
            channel: snippet.channel_title,
            published_at: snippet.published_at,
        })
    }
}

// ============================================================================
// Email Types
// ============================================================================

/// Body of `POST /api/send-email`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// Result of an email send, in the shape the client expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmailResult {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}
