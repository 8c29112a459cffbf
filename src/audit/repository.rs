//! Audit log storage

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{ActionFlag, AuditLogEntry};
use crate::db::SafeRow;
use crate::store::StoreError;

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// The `limit` most recent entries, newest (highest id) first
    async fn recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, StoreError>;
}

/// PostgreSQL audit log over the admin site's `django_admin_log` table
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    async fn recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT l.id::BIGINT AS id, l.action_time, u.username, l.object_repr,
                      l.action_flag::SMALLINT AS action_flag, l.change_message
               FROM django_admin_log l
               JOIN profiles_user u ON u.id = l.user_id
               ORDER BY l.id DESC
               LIMIT $1"#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .iter()
            .map(|row| {
                let code: i16 = row.try_get_log("action_flag").unwrap_or(0);
                let action_flag = ActionFlag::from_code(code).ok_or_else(|| {
                    StoreError::CorruptRecord {
                        table: "django_admin_log",
                        detail: format!("unknown action_flag {}", code),
                    }
                })?;
                Ok(AuditLogEntry {
                    id: row.try_get_log("id").unwrap_or_default(),
                    action_time: row.try_get_log("action_time").unwrap_or_default(),
                    username: row.try_get_log("username").unwrap_or_default(),
                    object_repr: row.try_get_log("object_repr").unwrap_or_default(),
                    action_flag,
                    change_message: row.try_get_log("change_message").unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(entries)
    }
}
