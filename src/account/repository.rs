//! Account storage

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::User;
use crate::store::StoreError;

/// Storage access for user accounts, keyed by id
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by username ascending
    async fn list_by_username(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, StoreError>;

    /// Remove by id without checking for dependent records (orders keep
    /// their copy of the customer's name and email).
    async fn delete(&self, user_id: i64) -> Result<bool, StoreError>;
}

/// PostgreSQL user repository over the storefront's `profiles_user` table
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_by_username(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<User> = sqlx::query_as(
            r#"SELECT id, username, email, is_superuser, date_joined
               FROM profiles_user ORDER BY username ASC, id ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        let row: Option<User> = sqlx::query_as(
            r#"SELECT id, username, email, is_superuser, date_joined
               FROM profiles_user WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, user_id: i64) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM profiles_user WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
