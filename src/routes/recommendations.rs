use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{RecommendationSet, SurveyInput},
    routes::{json_body, AppState},
};

/// Body of `POST /api/analyze`
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// The recommendation array serialized as JSON text
    pub recommendation: String,
}

/// Recommendations wrapped as a JSON string, as the web client expects
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<SurveyInput>, JsonRejection>,
) -> AppResult<Json<AnalyzeResponse>> {
    let survey = json_body(body)?;
    let recommendations = run_pipeline(&state, &request_id, &survey).await;

    Ok(Json(AnalyzeResponse {
        recommendation: recommendations.to_json_string(),
    }))
}

/// Recommendations as a plain JSON array
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<SurveyInput>, JsonRejection>,
) -> AppResult<Json<RecommendationSet>> {
    let survey = json_body(body)?;
    let recommendations = run_pipeline(&state, &request_id, &survey).await;

    Ok(Json(recommendations))
}

async fn run_pipeline(
    state: &AppState,
    request_id: &RequestId,
    survey: &SurveyInput,
) -> RecommendationSet {
    tracing::info!(request_id = %request_id, "Processing recommendation request");

    let recommendations = state.pipeline.recommend(survey).await;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        fallback = recommendations.is_fallback(),
        "Recommendation request completed"
    );

    recommendations
}
