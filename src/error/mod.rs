//! Application error types for robust error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by the Supabase HTTP client.
#[derive(Error, Debug)]
pub enum SupabaseError {
    /// Request never produced a usable response (connect/timeout/TLS).
    #[error("supabase request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Supabase answered with a non-success status; `message` is the best
    /// human-readable text mined from the error body.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Supabase answered 2xx but the body was missing an expected field.
    #[error("unexpected response from supabase: {0}")]
    Unexpected(String),
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error(transparent)]
    Supabase(#[from] SupabaseError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            // Remote rejections keep their relayed message; transport and
            // decode failures surface as a gateway problem.
            AppError::Supabase(SupabaseError::Api { message, .. }) => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            AppError::Supabase(e @ SupabaseError::Network(_)) => {
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            AppError::Supabase(e @ SupabaseError::Unexpected(_)) => {
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::debug!(%status, %message, "request rejected");
        }

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
