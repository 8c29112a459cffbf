//! Data models for customer accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    #[schema(example = "player_one")]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Superusers may use the admin operations of the dashboard
    #[serde(default)]
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> User {
        User {
            id: 1,
            username: username.to_string(),
            email: email.to_string(),
            is_superuser: false,
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_username() {
        assert_eq!(user("mario", "mario@example.com").display_name(), "mario");
        assert_eq!(user("", "luigi@example.com").display_name(), "luigi@example.com");
    }

    #[test]
    fn test_superuser_flag_defaults_to_false_when_missing() {
        let json = r#"{"id": 3, "username": "peach", "date_joined": "2024-01-02T03:04:05Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.is_superuser);
        assert_eq!(user.email, "");
    }
}
