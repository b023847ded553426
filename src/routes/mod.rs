use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::{any::Any as PanicPayload, sync::Arc, time::Duration};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::AppError,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{
        CompletionClient, CostEnricher, GeminiBackend, Mailer, RecommendationPipeline,
        SmtpMailTransport, TravelCostClient, VideoSearch, YoutubeProvider,
    },
};

pub mod email;
pub mod recommendations;
pub mod videos;

const VIDEO_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Services shared by all handlers
pub struct AppState {
    pub pipeline: RecommendationPipeline,
    pub videos: VideoSearch,
    pub mailer: Mailer,
}

impl AppState {
    /// Wires the production backends described by the configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let gemini = GeminiBackend::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            Duration::from_secs(config.completion_timeout_secs),
        )?;
        let completion = CompletionClient::new(Arc::new(gemini))
            .with_max_attempts(config.completion_max_attempts);

        let enricher = if config.cost_enrichment_enabled {
            let cost_client = TravelCostClient::new(
                config.travel_cost_url.clone(),
                Duration::from_secs(config.cost_timeout_secs),
            )?;
            Some(CostEnricher::new(Arc::new(cost_client)))
        } else {
            None
        };

        let videos = match &config.youtube_api_key {
            Some(api_key) if !api_key.trim().is_empty() => {
                let provider = YoutubeProvider::new(
                    api_key.clone(),
                    config.youtube_api_url.clone(),
                    VIDEO_SEARCH_TIMEOUT,
                )?;
                VideoSearch::new(Arc::new(provider))
            }
            _ => VideoSearch::disabled(),
        };

        let mailer = match config.smtp() {
            Some(settings) => Mailer::new(Arc::new(SmtpMailTransport::new(settings)?)),
            None => Mailer::unconfigured(),
        };

        Ok(Self {
            pipeline: RecommendationPipeline::new(completion, enricher),
            videos,
            mailer,
        })
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(recommendations::analyze))
        .route("/recommend", post(recommendations::recommend))
        .route("/youtube", get(videos::search))
        .route("/youtube-search", post(videos::search_by_body))
        .route("/send-email", post(email::send_email))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Turns a handler panic into a 500 carrying the panic message
fn handle_panic(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    AppError::Internal(detail).into_response()
}

/// Unwraps a JSON body, reporting malformed bodies as invalid input
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}
