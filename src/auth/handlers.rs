//! Auth HTTP handlers: register, login, forgot-password, reset-password.
//!
//! Each handler is a single pass-through: parse the body, make one or two
//! Supabase calls, relay the outcome. No state is kept between requests.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::error::{AppError, AppResult, SupabaseError};
use crate::handlers::http::AppState;
use crate::middleware::{AppJson, BearerToken};
use crate::models::{OwnerDetails, UserProfile, UserType};

const USERS_TABLE: &str = "users";
const OWNER_DETAILS_TABLE: &str = "owner_details";

/// Where the password-reset email sends the user (frontend reset page).
const PASSWORD_RESET_REDIRECT: &str = "http://localhost:8080/reset-password";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub phone: String,
    pub user_type: UserType,
    // Required when user_type is owner, checked in the handler.
    pub company_name: Option<String>,
    pub headquarters: Option<String>,
    pub total_properties: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Reduced user object returned on login: nothing beyond these three fields.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// POST /api/auth/register
///
/// Signs the user up with the identity service, then writes the profile row
/// keyed by the issued id, plus an owner_details row for owners. The steps
/// are not transactional: if a profile insert fails after signup succeeded,
/// the identity record is left in place.
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let owner = match body.user_type {
        UserType::Owner => {
            let company_name = require_field(body.company_name.clone(), "companyName")?;
            let headquarters = require_field(body.headquarters.clone(), "headquarters")?;
            Some((company_name, headquarters))
        }
        UserType::Tenant => None,
    };

    let user = state.supabase().sign_up(&body.email, &body.password).await?;

    let profile = UserProfile {
        id: user.id.clone(),
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        phone: body.phone,
        user_type: body.user_type,
    };
    state.supabase().insert(USERS_TABLE, &profile).await?;

    if let Some((company_name, headquarters)) = owner {
        let details = OwnerDetails {
            user_id: user.id,
            company_name,
            headquarters,
            total_properties: body.total_properties.unwrap_or(0),
        };
        state.supabase().insert(OWNER_DETAILS_TABLE, &details).await?;
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful" })),
    ))
}

/// POST /api/auth/login
///
/// Remote rejections (wrong password, unknown user) come back as 401;
/// transport failures keep their gateway status.
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state
        .supabase()
        .sign_in_with_password(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            SupabaseError::Api { message, .. } => AppError::Auth(message),
            other => AppError::Supabase(other),
        })?;

    Ok(Json(LoginResponse {
        token: session.access_token,
        user: UserInfo {
            id: session.user.id,
            email: session.user.email,
            created_at: session.user.created_at,
        },
    }))
}

/// POST /api/auth/forgot-password
///
/// Rejects an absent or empty email before any remote call is made.
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(body): AppJson<ForgotPasswordRequest>,
) -> AppResult<Json<Value>> {
    let email = body
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("Email is required".to_string()))?;

    state
        .supabase()
        .reset_password_for_email(email, PASSWORD_RESET_REDIRECT)
        .await?;

    Ok(Json(
        json!({ "message": "Password reset email sent successfully" }),
    ))
}

/// POST /api/auth/reset-password
///
/// Requires `Authorization: Bearer <access_token>` (401 otherwise) and a
/// refresh_token in the body (400 otherwise). Establishes a fresh session
/// via the refresh grant, then updates the password with its access token.
pub async fn reset_password(
    State(state): State<AppState>,
    BearerToken(_access_token): BearerToken,
    AppJson(body): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<Value>> {
    let refresh_token = body
        .refresh_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Refresh token is required".to_string()))?;

    let session = state.supabase().refresh_session(refresh_token).await?;
    state
        .supabase()
        .update_user_password(&session.access_token, &body.password)
        .await?;

    Ok(Json(json!({ "message": "Password updated successfully" })))
}

fn require_field(value: Option<String>, name: &str) -> AppResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required for owner registration")))
}
