/// Email delivery of recommendation results over SMTP
use crate::{
    config::SmtpSettings,
    models::{EmailRequest, EmailResult},
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

pub const DEFAULT_SUBJECT: &str = "TRIPTO 여행지 추천 결과";
pub const SENT_MESSAGE: &str = "이메일이 성공적으로 전송되었습니다.";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EmailError {
    #[error("이메일 주소와 내용이 필요합니다.")]
    MissingFields,

    #[error("SMTP 설정이 완료되지 않았습니다.")]
    NotConfigured,

    #[error("이메일 전송 중 오류가 발생했습니다: {0}")]
    Delivery(String),
}

impl IntoResponse for EmailError {
    fn into_response(self) -> Response {
        let status = match self {
            EmailError::MissingFields => StatusCode::BAD_REQUEST,
            EmailError::NotConfigured | EmailError::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        tracing::warn!(status = %status, error = %self, "Email request failed");

        (status, Json(EmailResult::failed(self.to_string()))).into_response()
    }
}

/// A validated message ready for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl TryFrom<EmailRequest> for OutgoingEmail {
    type Error = EmailError;

    fn try_from(request: EmailRequest) -> Result<Self, Self::Error> {
        let to = request
            .to
            .filter(|t| !t.trim().is_empty())
            .ok_or(EmailError::MissingFields)?;
        let html = request
            .html
            .filter(|h| !h.trim().is_empty())
            .ok_or(EmailError::MissingFields)?;
        let subject = request
            .subject
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        Ok(Self {
            to: to.trim().to_string(),
            subject,
            html,
        })
    }
}

/// Delivers one HTML message
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
}

/// STARTTLS SMTP relay authenticated as the sending account
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailTransport {
    pub fn new(settings: SmtpSettings) -> Result<Self, lettre::transport::smtp::Error> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(settings.user.clone(), settings.password))
            .build();

        Ok(Self {
            transport,
            from: settings.user,
        })
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailTransport {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let from = self
            .from
            .parse()
            .map_err(|e| EmailError::Delivery(format!("invalid sender address: {}", e)))?;
        let to = email
            .to
            .parse()
            .map_err(|e| EmailError::Delivery(format!("invalid recipient address: {}", e)))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
            .map_err(|e| EmailError::Delivery(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError::Delivery(e.to_string()))?;

        Ok(())
    }
}

/// Validates and sends result emails
#[derive(Clone)]
pub struct Mailer {
    transport: Option<Arc<dyn MailTransport>>,
}

impl Mailer {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// A mailer with incomplete SMTP settings; every send fails
    pub fn unconfigured() -> Self {
        Self { transport: None }
    }

    pub async fn send(&self, request: EmailRequest) -> Result<EmailResult, EmailError> {
        let email = OutgoingEmail::try_from(request)?;

        let transport = self.transport.as_ref().ok_or(EmailError::NotConfigured)?;
        transport.deliver(&email).await?;

        tracing::info!(to = %email.to, subject = %email.subject, "Email sent");

        Ok(EmailResult::sent(SENT_MESSAGE))
    }
}
