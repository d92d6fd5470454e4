//! User profile rows persisted through the Supabase data API.

use serde::{Deserialize, Serialize};

/// Registrant kind. Gates creation of [`OwnerDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Tenant,
    Owner,
}

/// Row for the `users` table, keyed by the identity-service user id.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
}

/// Row for the `owner_details` table. Only written when a registrant
/// signs up as an owner; `user_id` references the `users` row.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerDetails {
    pub user_id: String,
    pub company_name: String,
    pub headquarters: String,
    pub total_properties: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserType::Tenant).unwrap(), "\"tenant\"");
        assert_eq!(serde_json::to_string(&UserType::Owner).unwrap(), "\"owner\"");
    }

    #[test]
    fn user_type_deserializes_lowercase() {
        let t: UserType = serde_json::from_str("\"tenant\"").unwrap();
        assert_eq!(t, UserType::Tenant);
        assert!(serde_json::from_str::<UserType>("\"landlord\"").is_err());
    }

    #[test]
    fn user_profile_row_shape() {
        let row = UserProfile {
            id: "u-1".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.com".to_string(),
            phone: "1".to_string(),
            user_type: UserType::Owner,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["user_type"], "owner");
        assert_eq!(json["first_name"], "A");
        assert_eq!(json.as_object().unwrap().len(), 6);
    }
}
