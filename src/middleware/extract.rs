//! Extractors: JSON bodies rejected as client input errors, bearer tokens.

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::header::AUTHORIZATION,
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// JSON body extractor that turns axum's rejection into a 400
/// `{"error": ...}` instead of the default plain-text response.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(AppJson(value))
    }
}

/// Extractor: access token from an `Authorization: Bearer <token>` header.
/// Absent or malformed headers are rejected with 401.
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Auth("Invalid authorization header".to_string()))?;
        Ok(BearerToken(token.to_string()))
    }
}
