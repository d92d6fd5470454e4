//! Shared application state and the health probe.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::supabase::SupabaseClient;

/// Shared application state: the single long-lived Supabase handle,
/// injected into every route handler.
#[derive(Clone)]
pub struct AppState {
    pub supabase: SupabaseClient,
}

impl AppState {
    pub fn supabase(&self) -> &SupabaseClient {
        &self.supabase
    }
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "rently" })),
    )
}
