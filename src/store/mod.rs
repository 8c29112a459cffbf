//! Record store wiring
//!
//! Every entity kind is reached through its own narrow repository trait
//! (`GameRepository`, `UserRepository`, `OrderRepository`,
//! `AuditLogRepository`). `Repositories` bundles one implementation of each
//! for a concrete backend: PostgreSQL for production, or the in-memory store
//! for local runs and tests.

pub mod memory;

use std::sync::Arc;

use thiserror::Error;

use crate::account::{PgUserRepository, UserRepository};
use crate::audit::{AuditLogRepository, PgAuditLogRepository};
use crate::catalog::{GameRepository, PgGameRepository};
use crate::checkout::{OrderRepository, PgOrderRepository};
use crate::db::Database;

pub use memory::{MemoryStore, Seed};

/// Failures of the underlying record store (connectivity, constraints).
///
/// These are never recovered by the dashboard; they surface as a generic
/// server error at the HTTP boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt record in {table}: {detail}")]
    CorruptRecord { table: &'static str, detail: String },
}

#[derive(Clone)]
enum Backend {
    Postgres(Arc<Database>),
    Memory(Arc<MemoryStore>),
}

/// One repository per entity kind, sharing a backend
#[derive(Clone)]
pub struct Repositories {
    pub games: Arc<dyn GameRepository>,
    pub users: Arc<dyn UserRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub audit: Arc<dyn AuditLogRepository>,
    backend: Backend,
}

impl Repositories {
    pub fn postgres(db: Arc<Database>) -> Self {
        let pool = db.pool().clone();
        Self {
            games: Arc::new(PgGameRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            orders: Arc::new(PgOrderRepository::new(pool.clone())),
            audit: Arc::new(PgAuditLogRepository::new(pool)),
            backend: Backend::Postgres(db),
        }
    }

    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            games: store.clone(),
            users: store.clone(),
            orders: store.clone(),
            audit: store.clone(),
            backend: Backend::Memory(store),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Postgres(db) => Ok(db.health_check().await?),
            Backend::Memory(_) => Ok(()),
        }
    }
}
