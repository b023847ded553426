use crate::models::{CostRequest, CostResponse};
use reqwest::Client as HttpClient;
use std::time::Duration;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CostServiceError {
    #[error("cost service timed out")]
    Timeout,

    #[error("cost service unreachable: {0}")]
    Connection(String),

    #[error("cost service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("cost service response had no text content")]
    MissingText,
}

impl From<reqwest::Error> for CostServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CostServiceError::Timeout
        } else {
            CostServiceError::Connection(err.to_string())
        }
    }
}

/// A travel cost calculator
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CostService: Send + Sync {
    /// Whether the service answers its health check
    async fn is_available(&self) -> bool;

    /// Returns the service's text breakdown for one destination
    async fn calculate_cost(&self, request: &CostRequest) -> Result<String, CostServiceError>;
}

/// HTTP client for the travel cost service
pub struct TravelCostClient {
    http_client: HttpClient,
    base_url: String,
}

impl TravelCostClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl CostService for TravelCostClient {
    async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.base_url);

        match self
            .http_client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Cost service health check failed");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Cost service unreachable");
                false
            }
        }
    }

    async fn calculate_cost(&self, request: &CostRequest) -> Result<String, CostServiceError> {
        let url = format!("{}/api/calculate-cost", self.base_url);

        tracing::debug!(
            destination = %request.destination,
            days = request.days,
            travelers = request.travelers,
            "Requesting travel cost"
        );

        let response = self.http_client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CostServiceError::Status { status, body });
        }

        let envelope: CostResponse = response.json().await?;

        envelope
            .text()
            .map(str::to_string)
            .ok_or(CostServiceError::MissingText)
    }
}
