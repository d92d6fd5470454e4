//! Request extractors shared by the route handlers.

pub mod extract;

pub use extract::{AppJson, BearerToken};
