//! Game storage

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Game, GameDraft};
use crate::store::StoreError;

/// Storage access for games, keyed by id
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// All games ordered by name ascending
    async fn list_by_name(&self) -> Result<Vec<Game>, StoreError>;

    async fn find_by_id(&self, game_id: i64) -> Result<Option<Game>, StoreError>;

    async fn insert(&self, draft: &GameDraft) -> Result<Game, StoreError>;

    /// Overwrite every field of an existing game. `None` if the id is unknown.
    async fn update(&self, game_id: i64, draft: &GameDraft) -> Result<Option<Game>, StoreError>;

    /// Remove by id. Returns whether a row was removed.
    async fn delete(&self, game_id: i64) -> Result<bool, StoreError>;
}

/// PostgreSQL game repository over the storefront's `games_game` table
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for PgGameRepository {
    async fn list_by_name(&self) -> Result<Vec<Game>, StoreError> {
        let rows: Vec<Game> = sqlx::query_as(
            r#"SELECT id, name, description, platform, price, image
               FROM games_game ORDER BY name ASC, id ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, game_id: i64) -> Result<Option<Game>, StoreError> {
        let row: Option<Game> = sqlx::query_as(
            r#"SELECT id, name, description, platform, price, image
               FROM games_game WHERE id = $1"#,
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert(&self, draft: &GameDraft) -> Result<Game, StoreError> {
        let game: Game = sqlx::query_as(
            r#"INSERT INTO games_game (name, description, platform, price, image)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, name, description, platform, price, image"#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.platform)
        .bind(draft.price)
        .bind(&draft.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(game)
    }

    async fn update(&self, game_id: i64, draft: &GameDraft) -> Result<Option<Game>, StoreError> {
        let game: Option<Game> = sqlx::query_as(
            r#"UPDATE games_game
               SET name = $2, description = $3, platform = $4, price = $5, image = $6
               WHERE id = $1
               RETURNING id, name, description, platform, price, image"#,
        )
        .bind(game_id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.platform)
        .bind(draft.price)
        .bind(&draft.image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    async fn delete(&self, game_id: i64) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM games_game WHERE id = $1")
            .bind(game_id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
