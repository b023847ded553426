/// Text completion against the Gemini `generateContent` endpoint
///
/// One `CompletionBackend::generate` call is one upstream attempt. The
/// retry policy lives in `CompletionClient`, which never fails: exhausted
/// retries surface as a failure variant of `CompletionOutcome` so the
/// normalizer can degrade to its fallback record.
use reqwest::Client as HttpClient;
use serde::Serialize;
use std::{sync::Arc, time::Duration};

/// Text returned when the provider envelope lacks the expected keys
pub const MISSING_TEXT_PLACEHOLDER: &str = "추천 결과를 가져올 수 없습니다.";

/// Upper bound on attempts per prompt
pub const MAX_ATTEMPTS: u32 = 3;

/// Failure of a single completion attempt
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CompletionError {
    #[error("completion request timed out")]
    Timeout,

    #[error("completion request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout
        } else {
            CompletionError::Transport(err.to_string())
        }
    }
}

/// A remote text generation service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Performs one attempt and returns the raw generated text
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Result of a prompt after retries
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    Success(String),
    TimeoutFailure,
    TransportFailure(String),
}

impl CompletionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionOutcome::Success(_))
    }

    /// User-facing text for the outcome; the raw text on success
    pub fn degraded_message(&self) -> String {
        match self {
            CompletionOutcome::Success(text) => text.clone(),
            CompletionOutcome::TimeoutFailure => {
                "Gemini API 타임아웃 오류: 서버 응답이 없습니다. 잠시 후 다시 시도해주세요.".to_string()
            }
            CompletionOutcome::TransportFailure(detail) => {
                format!("Gemini API 호출 오류: {}", detail)
            }
        }
    }
}

/// Sends prompts to a backend with bounded immediate retries
#[derive(Clone)]
pub struct CompletionClient {
    backend: Arc<dyn CompletionBackend>,
    max_attempts: u32,
}

impl CompletionClient {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Overrides the attempt count, clamped to `1..=MAX_ATTEMPTS`
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.clamp(1, MAX_ATTEMPTS);
        self
    }

    pub async fn complete(&self, prompt: &str) -> CompletionOutcome {
        let mut last_error = CompletionError::Timeout;

        for attempt in 1..=self.max_attempts {
            tracing::info!(
                attempt,
                max_attempts = self.max_attempts,
                "Calling completion endpoint"
            );

            match self.backend.generate(prompt).await {
                Ok(text) => {
                    tracing::debug!(text = %text, "Completion text received");
                    return CompletionOutcome::Success(text);
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Completion attempt failed"
                    );
                    last_error = e;
                }
            }
        }

        let outcome = match last_error {
            CompletionError::Timeout => CompletionOutcome::TimeoutFailure,
            CompletionError::Transport(detail) => CompletionOutcome::TransportFailure(detail),
        };

        tracing::error!(
            message = %outcome.degraded_message(),
            "Completion attempts exhausted"
        );

        outcome
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<GenerateContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GenerateContent<'a> {
    parts: Vec<GeneratePart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeneratePart<'a> {
    text: &'a str,
}

/// Gemini `generateContent` backend
pub struct GeminiBackend {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GeminiBackend {
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
impl CompletionBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = GenerateRequest {
            contents: vec![GenerateContent {
                parts: vec![GeneratePart { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Transport(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let envelope: serde_json::Value = response.json().await?;
        tracing::debug!(response = %envelope, "Raw Gemini API response");

        Ok(extract_text(&envelope))
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a Gemini envelope
pub fn extract_text(envelope: &serde_json::Value) -> String {
    envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|t| t.as_str())
        .unwrap_or(MISSING_TEXT_PLACEHOLDER)
        .to_string()
}
