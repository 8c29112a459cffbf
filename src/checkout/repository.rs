//! Order storage

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::Order;
use crate::store::StoreError;

/// Read access to orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All orders, most recent first
    async fn list_by_date_desc(&self) -> Result<Vec<Order>, StoreError>;
}

/// PostgreSQL order repository over the storefront's `checkout_order` table
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn list_by_date_desc(&self) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<Order> = sqlx::query_as(
            r#"SELECT order_number, user_profile_id AS user_id, full_name, email, date,
                      order_total, grand_total
               FROM checkout_order ORDER BY date DESC, order_number ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
