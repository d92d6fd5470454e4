//! Supabase backend: GoTrue auth endpoints and PostgREST table inserts.

mod client;

pub use client::{AuthUser, Session, SupabaseClient};
