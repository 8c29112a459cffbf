//! Audit log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of change recorded by an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum ActionFlag {
    Addition = 1,
    Change = 2,
    Deletion = 3,
}

impl ActionFlag {
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Addition),
            2 => Some(Self::Change),
            3 => Some(Self::Deletion),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditLogEntry {
    pub id: i64,
    pub action_time: DateTime<Utc>,
    /// Username of the acting admin
    pub username: String,
    pub object_repr: String,
    pub action_flag: ActionFlag,
    #[serde(default)]
    pub change_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_flag_from_code() {
        assert_eq!(ActionFlag::from_code(1), Some(ActionFlag::Addition));
        assert_eq!(ActionFlag::from_code(2), Some(ActionFlag::Change));
        assert_eq!(ActionFlag::from_code(3), Some(ActionFlag::Deletion));
        assert_eq!(ActionFlag::from_code(0), None);
        assert_eq!(ActionFlag::from_code(4), None);
    }

    #[test]
    fn test_action_flag_serializes_lowercase() {
        let json = serde_json::to_string(&ActionFlag::Deletion).unwrap();
        assert_eq!(json, "\"deletion\"");
    }
}
