use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use tripto_api::{
    create_router,
    error::AppResult,
    models::{CostRequest, Video},
    services::{
        completion::{CompletionBackend, CompletionError},
        email::Mailer,
        enrichment::{CostService, CostServiceError},
        CompletionClient, CostEnricher, RecommendationPipeline, VideoProvider, VideoSearch,
    },
    AppState,
};

const MODEL_REPLY: &str = "```json\n[\n  {'place': '오사카, 일본', 'flight': '30만원', 'hotel': '10만원', \
    'reason': '먹거리와 쇼핑', 'local_price': '50만원', 'total_cost': '100만원', 'airport_code': 'KIX'},\n  \
    {'place': '제주도', 'flight': '10만원', 'hotel': '8만원', 'reason': '가까운 휴양지', \
    'local_price': '30만원', 'total_cost': '60만원', 'airport_code': 'CJU'}\n]\n```";

const COST_TEXT: &str = "🏨 숙박비: 120,000원\n✈️ 항공료 (예상): 700,000원\n\
    🎯 **총 여행 경비: 2,100,000원**";

struct FixedCompletion(Result<&'static str, CompletionError>);

#[async_trait::async_trait]
impl CompletionBackend for FixedCompletion {
    async fn generate(&self, _prompt: &str) -> Result<String, CompletionError> {
        self.0.clone().map(str::to_string)
    }
}

struct FixedCostService {
    available: bool,
}

#[async_trait::async_trait]
impl CostService for FixedCostService {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn calculate_cost(&self, _request: &CostRequest) -> Result<String, CostServiceError> {
        Ok(COST_TEXT.to_string())
    }
}

struct FixedVideos;

#[async_trait::async_trait]
impl VideoProvider for FixedVideos {
    async fn search(&self, query: &str) -> AppResult<Vec<Video>> {
        Ok(vec![Video {
            id: "vid1".to_string(),
            title: query.to_string(),
            description: String::new(),
            url: "https://www.youtube.com/watch?v=vid1".to_string(),
            thumbnail: String::new(),
            channel: "채널".to_string(),
            published_at: "2024-03-01T00:00:00Z".to_string(),
        }])
    }
}

fn create_test_server(
    reply: Result<&'static str, CompletionError>,
    cost_service: Option<FixedCostService>,
) -> TestServer {
    let completion = CompletionClient::new(Arc::new(FixedCompletion(reply)));
    let enricher = cost_service.map(|service| CostEnricher::new(Arc::new(service)));

    let state = AppState {
        pipeline: RecommendationPipeline::new(completion, enricher),
        videos: VideoSearch::new(Arc::new(FixedVideos)),
        mailer: Mailer::unconfigured(),
    };

    TestServer::new(create_router(Arc::new(state), &[])).unwrap()
}

fn survey() -> Value {
    json!({
        "q0": "해외",
        "q1": "휴식",
        "q4": "200",
        "q4_1": "2",
        "q5": "3박",
        "q11": "2"
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(Ok("[]"), None);
    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_analyze_returns_stringified_array() {
    let server = create_test_server(Ok(MODEL_REPLY), None);
    let response = server.post("/api/analyze").json(&survey()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let text = body["recommendation"].as_str().unwrap();
    let records: Vec<Value> = serde_json::from_str(text).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["place"], "오사카, 일본");
    assert_eq!(records[1]["airport_code"], "CJU");
}

#[tokio::test]
async fn test_recommend_enriches_supported_destinations() {
    let server = create_test_server(Ok(MODEL_REPLY), Some(FixedCostService { available: true }));
    let response = server.post("/api/recommend").json(&survey()).await;

    response.assert_status_ok();
    let records: Vec<Value> = response.json();

    // 700,000 flight split across two travelers
    assert_eq!(records[0]["flight"], "35만원");
    assert_eq!(records[0]["hotel"], "12만원");
    assert_eq!(records[0]["local_price"], "140만원");
    assert_eq!(records[0]["total_cost"], "210만원");

    assert_eq!(records[1]["flight"], "10만원");
    assert_eq!(records[1]["total_cost"], "60만원");
}

#[tokio::test]
async fn test_unavailable_cost_service_keeps_model_figures() {
    let server = create_test_server(Ok(MODEL_REPLY), Some(FixedCostService { available: false }));
    let response = server.post("/api/recommend").json(&survey()).await;

    let records: Vec<Value> = response.json();
    assert_eq!(records[0]["flight"], "30만원");
    assert_eq!(records[0]["total_cost"], "100만원");
}

#[tokio::test]
async fn test_completion_failure_returns_fallback_record() {
    let server = create_test_server(
        Err(CompletionError::Transport("connection refused".to_string())),
        Some(FixedCostService { available: true }),
    );
    let response = server.post("/api/recommend").json(&survey()).await;

    response.assert_status_ok();
    let records: Vec<Value> = response.json();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["place"], "추천 결과 파싱 오류");
    assert_eq!(records[0]["airport_code"], "N/A");
}

#[tokio::test]
async fn test_unparsable_reply_returns_fallback_record() {
    let server = create_test_server(Ok("죄송하지만 추천할 수 없습니다."), None);
    let response = server.post("/api/analyze").json(&survey()).await;

    let body: Value = response.json();
    let records: Vec<Value> = serde_json::from_str(body["recommendation"].as_str().unwrap()).unwrap();
    assert_eq!(records[0]["place"], "추천 결과 파싱 오류");
}

#[tokio::test]
async fn test_non_object_survey_is_rejected() {
    let server = create_test_server(Ok(MODEL_REPLY), None);
    let response = server.post("/api/recommend").json(&json!(["q0"])).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(Ok("[]"), None);
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("client-trace-7"),
        )
        .await;

    assert_eq!(response.header("x-request-id"), "client-trace-7");
}

#[tokio::test]
async fn test_video_search_requires_destination() {
    let server = create_test_server(Ok("[]"), None);

    let response = server.get("/api/youtube").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "여행지가 제공되지 않았습니다." }));

    let response = server
        .post("/api/youtube-search")
        .json(&json!({ "destination": "  " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_video_search_returns_deduplicated_videos() {
    let server = create_test_server(Ok("[]"), None);
    let response = server
        .get("/api/youtube")
        .add_query_param("destination", "오사카")
        .add_query_param("companion", "친구")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let videos = body["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["title"], "오사카 친구 여행 브이로그");
    assert_eq!(videos[0]["publishedAt"], "2024-03-01T00:00:00Z");
}

#[tokio::test]
async fn test_send_email_validation_and_configuration() {
    let server = create_test_server(Ok("[]"), None);

    let response = server
        .post("/api/send-email")
        .json(&json!({ "to": "traveler@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "success": false,
        "error": "이메일 주소와 내용이 필요합니다."
    }));

    let response = server
        .post("/api/send-email")
        .json(&json!({ "to": "traveler@example.com", "html": "<p>결과</p>" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "success": false,
        "error": "SMTP 설정이 완료되지 않았습니다."
    }));
}
