use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::{
    models::{EmailRequest, EmailResult},
    routes::AppState,
    services::email::EmailError,
};

/// Handler for `POST /api/send-email`
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<EmailResult>, EmailError> {
    let Ok(Json(request)) = body else {
        return Err(EmailError::MissingFields);
    };

    state.mailer.send(request).await.map(Json)
}
