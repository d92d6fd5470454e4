//! Thin reqwest client for the Supabase HTTP APIs.
//!
//! Covers exactly the calls the gateway delegates: GoTrue signup, password
//! grant, recover, refresh grant, user update, and PostgREST inserts.
//! Every call is a single synchronous attempt; there are no retries.

use reqwest::{header::AUTHORIZATION, Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::SupabaseError;

const APIKEY_HEADER: &str = "apikey";

/// User record as issued by GoTrue. Only relayed, never stored locally.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// ISO-8601 timestamp, relayed as an opaque string.
    #[serde(default)]
    pub created_at: String,
}

/// Session issued by GoTrue on login or refresh. The refresh token is not
/// kept: no route relays it, callers only need the access token and user.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

/// Signup responses differ by project settings: with email confirmation on,
/// GoTrue returns the bare user; with autoconfirm, a full session.
#[derive(Debug, Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
}

/// Handle to the remote Supabase project. Cheap to clone; the underlying
/// reqwest client is safe for concurrent use.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create an identity record. Returns the user issued by GoTrue.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, SupabaseError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        debug!(%url, %email, "supabase sign_up");
        let response = self
            .http
            .post(&url)
            .header(APIKEY_HEADER, &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: SignUpResponse = check(response).await?.json::<SignUpResponse>().await?;

        match (body.user, body.id) {
            (Some(user), _) => Ok(user),
            (None, Some(id)) => Ok(AuthUser {
                id,
                email: email.to_string(),
                created_at: String::new(),
            }),
            (None, None) => Err(SupabaseError::Unexpected(
                "no user id in signup response".to_string(),
            )),
        }
    }

    /// Exchange email/password for a session (GoTrue password grant).
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SupabaseError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        debug!(%url, %email, "supabase sign_in");
        let response = self
            .http
            .post(&url)
            .header(APIKEY_HEADER, &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(check(response).await?.json::<Session>().await?)
    }

    /// Send a password-reset email; the link returns the user to `redirect_to`.
    pub async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), SupabaseError> {
        let url = format!("{}/auth/v1/recover", self.base_url);
        debug!(%url, %email, "supabase recover");
        let response = self
            .http
            .post(&url)
            .query(&[("redirect_to", redirect_to)])
            .header(APIKEY_HEADER, &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&json!({ "email": email }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Establish a fresh session from a refresh token (refresh grant).
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, SupabaseError> {
        let url = format!("{}/auth/v1/token?grant_type=refresh_token", self.base_url);
        debug!(%url, "supabase refresh_session");
        let response = self
            .http
            .post(&url)
            .header(APIKEY_HEADER, &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        Ok(check(response).await?.json::<Session>().await?)
    }

    /// Set a new password for the user owning `access_token`.
    pub async fn update_user_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<(), SupabaseError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        debug!(%url, "supabase update_user");
        let response = self
            .http
            .put(&url)
            .header(APIKEY_HEADER, &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .json(&json!({ "password": password }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Insert one row into a PostgREST table. The inserted row is not
    /// echoed back (`Prefer: return=minimal`).
    pub async fn insert<T: serde::Serialize>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<(), SupabaseError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!(%url, "supabase insert");
        let response = self
            .http
            .post(&url)
            .header(APIKEY_HEADER, &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into `SupabaseError::Api`, relaying the
/// most useful message from the error body.
async fn check(response: Response) -> Result<Response, SupabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<Value>(&text) {
        Ok(body) => api_error_message(&body)
            .unwrap_or(text.as_str())
            .to_string(),
        Err(_) => text,
    };
    Err(SupabaseError::Api { status, message })
}

/// Pick the human-readable message out of a GoTrue or PostgREST error body.
/// GoTrue uses `error_description` / `msg` / `error`, PostgREST uses `message`.
fn api_error_message(body: &Value) -> Option<&str> {
    for key in ["error_description", "msg", "message", "error"] {
        if let Some(s) = body.get(key).and_then(Value::as_str) {
            return Some(s);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_error_description() {
        let body = json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" });
        assert_eq!(api_error_message(&body), Some("Invalid login credentials"));
    }

    #[test]
    fn error_message_reads_postgrest_message() {
        let body = json!({ "code": "23505", "message": "duplicate key value" });
        assert_eq!(api_error_message(&body), Some("duplicate key value"));
    }

    #[test]
    fn error_message_none_for_unknown_shape() {
        assert_eq!(api_error_message(&json!({ "weird": true })), None);
        assert_eq!(api_error_message(&json!("oops")), None);
    }

    #[test]
    fn signup_response_bare_user() {
        let body: SignUpResponse =
            serde_json::from_str(r#"{"id":"u-1","email":"a@b.com","created_at":"2024-01-01T00:00:00Z"}"#)
                .unwrap();
        assert_eq!(body.id.as_deref(), Some("u-1"));
        assert!(body.user.is_none());
    }

    #[test]
    fn signup_response_with_session() {
        let body: SignUpResponse = serde_json::from_str(
            r#"{"access_token":"t","user":{"id":"u-2","email":"a@b.com","created_at":"x"}}"#,
        )
        .unwrap();
        assert_eq!(body.user.unwrap().id, "u-2");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = SupabaseClient::new("http://localhost:54321/", "key");
        assert_eq!(client.base_url, "http://localhost:54321");
    }
}
