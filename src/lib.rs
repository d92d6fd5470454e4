//! Rently API gateway.
//!
//! Thin HTTP layer for the Rently rental platform: registration, login,
//! password reset, and a contact form. All identity and persistence work
//! is delegated to a Supabase backend; every route is parse → delegate →
//! relay the remote outcome.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod supabase;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;
pub use supabase::SupabaseClient;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Origins allowed to call the `/api` routes from a browser.
const ALLOWED_ORIGINS: [&str; 3] = [
    "https://rently.netlify.app",
    "http://localhost:8080",
    "http://localhost:3000",
];

/// Build the API router. Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let auth_routes = axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password));

    let api_routes = axum::Router::new()
        .nest("/auth", auth_routes)
        .route("/contact", post(handlers::contact::submit_contact))
        .layer(cors_layer());

    axum::Router::new()
        .route("/health", get(handlers::http::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .into_iter()
        .map(HeaderValue::from_static)
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
