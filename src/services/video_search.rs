/// Travel video search
///
/// A destination is expanded into a handful of Korean and English queries,
/// each sent to a `VideoProvider` until enough distinct videos are found.
/// Search is auxiliary: a failing query is logged and skipped, and missing
/// credentials yield an empty list rather than an error response.
use crate::{
    error::{AppError, AppResult},
    models::{Video, YoutubeSearchResponse},
};
use reqwest::Client as HttpClient;
use std::{collections::HashSet, sync::Arc, time::Duration};

/// Videos returned per search
pub const MAX_VIDEOS: usize = 5;

const RESULTS_PER_QUERY: &str = "10";
const PUBLISHED_AFTER: &str = "2020-01-01T00:00:00Z";
const UNSPECIFIED_COMPANION: &str = "기타";

/// A video search backend
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VideoProvider: Send + Sync {
    async fn search(&self, query: &str) -> AppResult<Vec<Video>>;
}

/// YouTube Data API search backend
pub struct YoutubeProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl YoutubeProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }
}

#[async_trait::async_trait]
impl VideoProvider for YoutubeProvider {
    async fn search(&self, query: &str) -> AppResult<Vec<Video>> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", RESULTS_PER_QUERY),
                ("order", "relevance"),
                ("videoDefinition", "any"),
                ("videoDuration", "medium"),
                ("videoEmbeddable", "true"),
                ("videoSyndicated", "true"),
                ("publishedAfter", PUBLISHED_AFTER),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "YouTube API returned status {}: {}",
                status, body
            )));
        }

        let results: YoutubeSearchResponse = response.json().await?;
        let videos: Vec<Video> = results
            .items
            .into_iter()
            .filter_map(|item| item.into_video())
            .collect();

        tracing::debug!(query = %query, results = videos.len(), "Video query completed");

        Ok(videos)
    }
}

/// Finds travel videos for a destination
#[derive(Clone)]
pub struct VideoSearch {
    provider: Option<Arc<dyn VideoProvider>>,
}

impl VideoSearch {
    pub fn new(provider: Arc<dyn VideoProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A search with no backend; always returns no videos
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub async fn find_videos(&self, destination: &str, companion: Option<&str>) -> Vec<Video> {
        let Some(provider) = &self.provider else {
            tracing::warn!("YouTube API key not configured, returning no videos");
            return Vec::new();
        };

        let videos = collect_videos(provider.as_ref(), destination, companion).await;

        tracing::info!(
            destination = %destination,
            videos = videos.len(),
            "Video search completed"
        );

        videos
    }
}

async fn collect_videos(
    provider: &dyn VideoProvider,
    destination: &str,
    companion: Option<&str>,
) -> Vec<Video> {
    let mut videos = Vec::new();

    for query in search_queries(destination, companion) {
        if videos.len() >= MAX_VIDEOS {
            break;
        }

        match provider.search(&query).await {
            Ok(found) => videos.extend(found),
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Video query failed, skipping");
            }
        }
    }

    let mut seen = HashSet::new();
    videos.retain(|video| seen.insert(video.id.clone()));
    videos.truncate(MAX_VIDEOS);

    videos
}

/// Queries tried in order for a destination
pub fn search_queries(destination: &str, companion: Option<&str>) -> Vec<String> {
    let destination = destination.trim();
    let companion = companion
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != UNSPECIFIED_COMPANION)
        .map(|c| format!(" {}", c))
        .unwrap_or_default();

    vec![
        format!("{}{} 여행 브이로그", destination, companion),
        format!("{}{} 여행", destination, companion),
        format!("{} travel vlog", destination),
        format!("{} 관광", destination),
    ]
}
