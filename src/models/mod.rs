//! Data models for user profiles, owner details, and contact messages.

pub mod contact;
pub mod user;

pub use contact::*;
pub use user::*;
