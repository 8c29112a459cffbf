//! In-memory record store
//!
//! Backs local runs without PostgreSQL and the test suites. Listings come
//! back in the same shape as the PostgreSQL repositories: games by name,
//! users by username, orders newest first, audit entries by descending id.
//! Names compare case-insensitively with ties broken by id, which agrees
//! with the usual locale collations but not with a byte-order `C` one.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::StoreError;
use crate::account::{User, UserRepository};
use crate::audit::{AuditLogEntry, AuditLogRepository};
use crate::catalog::{Game, GameDraft, GameRepository};
use crate::checkout::{Order, OrderRepository};

/// Initial contents for a `MemoryStore`
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub audit_log: Vec<AuditLogEntry>,
}

impl Seed {
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse seed file: {}", path.display()))
    }
}

#[derive(Default)]
struct Tables {
    games: BTreeMap<i64, Game>,
    users: BTreeMap<i64, User>,
    orders: BTreeMap<String, Order>,
    audit_log: BTreeMap<i64, AuditLogEntry>,
    next_game_id: i64,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
    mutations: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_seed(Seed::default())
    }

    pub fn from_seed(seed: Seed) -> Self {
        let mut tables = Tables::default();
        for game in seed.games {
            tables.games.insert(game.id, game);
        }
        for user in seed.users {
            tables.users.insert(user.id, user);
        }
        for order in seed.orders {
            tables.orders.insert(order.order_number.clone(), order);
        }
        for entry in seed.audit_log {
            tables.audit_log.insert(entry.id, entry);
        }
        tables.next_game_id = tables.games.keys().next_back().copied().unwrap_or(0) + 1;

        Self {
            tables: RwLock::new(tables),
            mutations: AtomicU64::new(0),
        }
    }

    /// Number of successful writes since creation
    pub fn mutation_count(&self) -> u64 {
        self.mutations.load(Ordering::SeqCst)
    }

    fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl GameRepository for MemoryStore {
    async fn list_by_name(&self) -> Result<Vec<Game>, StoreError> {
        let tables = self.tables.read().await;
        let mut games: Vec<Game> = tables.games.values().cloned().collect();
        games.sort_by_cached_key(|g| (g.name.to_lowercase(), g.id));
        Ok(games)
    }

    async fn find_by_id(&self, game_id: i64) -> Result<Option<Game>, StoreError> {
        Ok(self.tables.read().await.games.get(&game_id).cloned())
    }

    async fn insert(&self, draft: &GameDraft) -> Result<Game, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_game_id;
        tables.next_game_id += 1;
        let game = draft.clone().into_game(id);
        tables.games.insert(id, game.clone());
        self.record_mutation();
        Ok(game)
    }

    async fn update(&self, game_id: i64, draft: &GameDraft) -> Result<Option<Game>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.games.get_mut(&game_id) else {
            return Ok(None);
        };
        *slot = draft.clone().into_game(game_id);
        let game = slot.clone();
        self.record_mutation();
        Ok(Some(game))
    }

    async fn delete(&self, game_id: i64) -> Result<bool, StoreError> {
        let removed = self.tables.write().await.games.remove(&game_id).is_some();
        if removed {
            self.record_mutation();
        }
        Ok(removed)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list_by_username(&self) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by_cached_key(|u| (u.username.to_lowercase(), u.id));
        Ok(users)
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&user_id).cloned())
    }

    async fn delete(&self, user_id: i64) -> Result<bool, StoreError> {
        let removed = self.tables.write().await.users.remove(&user_id).is_some();
        if removed {
            self.record_mutation();
        }
        Ok(removed)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn list_by_date_desc(&self) -> Result<Vec<Order>, StoreError> {
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> = tables.orders.values().cloned().collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }
}

#[async_trait]
impl AuditLogRepository for MemoryStore {
    async fn recent(&self, limit: usize) -> Result<Vec<AuditLogEntry>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .audit_log
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}
