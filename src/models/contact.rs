//! Contact-form messages persisted through the Supabase data API.

use serde::Serialize;

/// Row for the `contact_messages` table. Fields are stored exactly as
/// submitted, with no trimming or normalization.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
