//! Contact-form handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;
use crate::middleware::AppJson;
use crate::models::ContactMessage;

const CONTACT_MESSAGES_TABLE: &str = "contact_messages";

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

/// POST /api/contact
///
/// Persists the four fields exactly as submitted and echoes nothing back
/// beyond a success message.
pub async fn submit_contact(
    State(state): State<AppState>,
    AppJson(body): AppJson<ContactRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let row = ContactMessage {
        name: body.name,
        email: body.email,
        subject: body.subject,
        message: body.message,
    };
    state.supabase().insert(CONTACT_MESSAGES_TABLE, &row).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Message sent successfully" })),
    ))
}
