use crate::account::User;
use crate::dashboard::DashboardError;

/// The authenticated account behind the current request
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub is_superuser: bool,
}

/// Proof that the current principal is a superuser.
///
/// Only obtainable through [`Principal::require_superuser`]; every admin
/// operation takes one, so an unchecked call does not type-check.
#[derive(Debug, Clone, PartialEq)]
pub struct Superuser {
    user_id: i64,
    username: String,
}

impl Principal {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.display_name().to_string(),
            is_superuser: user.is_superuser,
        }
    }

    pub fn require_superuser(&self) -> Result<Superuser, DashboardError> {
        if !self.is_superuser {
            return Err(DashboardError::AccessDenied);
        }
        Ok(Superuser {
            user_id: self.user_id,
            username: self.username.clone(),
        })
    }
}

impl Superuser {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(is_superuser: bool) -> User {
        User {
            id: 9,
            username: "staff".to_string(),
            email: "staff@example.com".to_string(),
            is_superuser,
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn test_superuser_admitted() {
        let principal = Principal::from_user(&user(true));
        let admin = principal.require_superuser().unwrap();
        assert_eq!(admin.user_id(), 9);
        assert_eq!(admin.username(), "staff");
    }

    #[test]
    fn test_regular_user_denied() {
        let principal = Principal::from_user(&user(false));
        assert!(matches!(
            principal.require_superuser(),
            Err(DashboardError::AccessDenied)
        ));
    }
}
