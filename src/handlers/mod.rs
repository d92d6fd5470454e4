//! HTTP request handlers and shared application state.

pub mod contact;
pub mod http;

pub use contact::*;
pub use http::*;
