use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Video,
    routes::{json_body, AppState},
};

const MISSING_DESTINATION: &str = "여행지가 제공되지 않았습니다.";

#[derive(Debug, Default, Deserialize)]
pub struct VideoQuery {
    #[serde(default)]
    destination: Option<String>,
    #[serde(default)]
    companion: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub videos: Vec<Video>,
}

/// Handler for `GET /api/youtube`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideoQuery>,
) -> AppResult<Json<VideoResponse>> {
    find(&state, query).await
}

/// Handler for `POST /api/youtube-search`
pub async fn search_by_body(
    State(state): State<Arc<AppState>>,
    body: Result<Json<VideoQuery>, JsonRejection>,
) -> AppResult<Json<VideoResponse>> {
    find(&state, json_body(body)?).await
}

async fn find(state: &AppState, query: VideoQuery) -> AppResult<Json<VideoResponse>> {
    let destination = query
        .destination
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput(MISSING_DESTINATION.to_string()))?;

    let videos = state
        .videos
        .find_videos(&destination, query.companion.as_deref())
        .await;

    Ok(Json(VideoResponse { videos }))
}
