//! Management query service
//!
//! Every admin operation takes a `&Superuser`, which only the access check
//! can produce. List screens need nothing beyond an authenticated session.

use crate::account::User;
use crate::catalog::{Game, GameDraft, GameForm, UploadedImage};
use crate::checkout::Order;
use crate::config::AppConfig;
use crate::media::MediaStore;
use crate::money::Money;
use crate::store::Repositories;
use crate::user_auth::Superuser;

use super::error::DashboardError;
use super::reporting::{OrderRow, compute_sales_total};
use super::search::{Listing, SearchQuery};
use super::views::{DashboardView, ManagementView};

#[derive(Clone)]
pub struct ManagementService {
    repos: Repositories,
    media: MediaStore,
    max_upload_bytes: usize,
    recent_log_limit: usize,
}

impl ManagementService {
    pub fn new(
        repos: Repositories,
        media: MediaStore,
        max_upload_bytes: usize,
        recent_log_limit: usize,
    ) -> Self {
        Self {
            repos,
            media,
            max_upload_bytes,
            recent_log_limit,
        }
    }

    pub fn from_config(repos: Repositories, config: &AppConfig) -> Self {
        Self::new(
            repos,
            MediaStore::from_config(&config.media),
            config.media.max_upload_bytes,
            config.dashboard.recent_log_limit,
        )
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn media(&self) -> &MediaStore {
        &self.media
    }

    // ------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------

    /// Games by name, filtered by the raw `q` value.
    ///
    /// The query is parsed before anything is read, so an empty term fails
    /// without touching the store.
    pub async fn list_games(&self, raw_query: Option<&str>) -> Result<Listing<Game>, DashboardError> {
        let query = SearchQuery::parse(raw_query)?;
        let all = self.repos.games.list_by_name().await?;
        Ok(Listing::build(all, query))
    }

    pub async fn list_users(&self, raw_query: Option<&str>) -> Result<Listing<User>, DashboardError> {
        let query = SearchQuery::parse(raw_query)?;
        let all = self.repos.users.list_by_username().await?;
        Ok(Listing::build(all, query))
    }

    pub async fn list_orders(
        &self,
        raw_query: Option<&str>,
    ) -> Result<Listing<Order>, DashboardError> {
        let query = SearchQuery::parse(raw_query)?;
        let all = self.repos.orders.list_by_date_desc().await?;
        Ok(Listing::build(all, query))
    }

    /// Sales over every order in the store
    pub async fn total_sales(&self) -> Result<Money, DashboardError> {
        let orders = self.repos.orders.list_by_date_desc().await?;
        Ok(compute_sales_total(&orders))
    }

    pub async fn games_screen(
        &self,
        raw_query: Option<&str>,
    ) -> Result<ManagementView<Game>, DashboardError> {
        let listing = self.list_games(raw_query).await?;
        Ok(ManagementView {
            listing,
            total_sales: self.total_sales().await?,
        })
    }

    pub async fn users_screen(
        &self,
        raw_query: Option<&str>,
    ) -> Result<ManagementView<User>, DashboardError> {
        let listing = self.list_users(raw_query).await?;
        Ok(ManagementView {
            listing,
            total_sales: self.total_sales().await?,
        })
    }

    pub async fn orders_screen(
        &self,
        raw_query: Option<&str>,
    ) -> Result<ManagementView<OrderRow>, DashboardError> {
        let listing = self.list_orders(raw_query).await?;
        // Summed over `all`, never over the filtered view
        let total_sales = compute_sales_total(&listing.all);
        Ok(ManagementView {
            listing: listing.map(OrderRow::from),
            total_sales,
        })
    }

    // ------------------------------------------------------------------
    // Admin operations
    // ------------------------------------------------------------------

    pub async fn dashboard(&self, admin: &Superuser) -> Result<DashboardView, DashboardError> {
        tracing::debug!(admin = %admin.username(), "Building dashboard summary");

        let logs = self.repos.audit.recent(self.recent_log_limit).await?;
        let all_games = self.repos.games.list_by_name().await?;
        let all_users = self.repos.users.list_by_username().await?;
        let orders = self.repos.orders.list_by_date_desc().await?;
        let total_sales = compute_sales_total(&orders);

        Ok(DashboardView {
            logs,
            all_games,
            all_users,
            all_orders: orders.into_iter().map(OrderRow::from).collect(),
            total_sales,
        })
    }

    /// Validate and insert a new game. The image is written only once the
    /// whole form is valid.
    pub async fn add_game(
        &self,
        admin: &Superuser,
        form: &GameForm,
        upload: Option<&UploadedImage>,
    ) -> Result<Game, DashboardError> {
        let mut draft = form
            .clean(upload, self.max_upload_bytes)
            .map_err(DashboardError::InvalidGameForm)?;
        let stored = self.store_upload(upload).await?;
        draft.image = stored.clone();

        let game = match self.repos.games.insert(&draft).await {
            Ok(game) => game,
            Err(e) => {
                self.discard_upload(stored.as_deref()).await;
                return Err(e.into());
            }
        };
        tracing::info!(
            admin = %admin.username(),
            game_id = game.id,
            name = %game.name,
            "Game added"
        );
        Ok(game)
    }

    pub async fn game_for_edit(&self, admin: &Superuser, game_id: i64) -> Result<Game, DashboardError> {
        tracing::debug!(admin = %admin.username(), game_id, "Opening game for edit");
        self.find_game(game_id).await
    }

    /// Overwrite an existing game. Without a new upload the stored image is kept.
    pub async fn edit_game(
        &self,
        admin: &Superuser,
        game_id: i64,
        form: &GameForm,
        upload: Option<&UploadedImage>,
    ) -> Result<Game, DashboardError> {
        let existing = self.find_game(game_id).await?;

        let mut draft: GameDraft = form
            .clean(upload, self.max_upload_bytes)
            .map_err(DashboardError::InvalidGameForm)?;
        let stored = self.store_upload(upload).await?;
        draft.image = stored.clone().or(existing.image);

        // The game may have been deleted since it was read
        let updated = self
            .repos
            .games
            .update(game_id, &draft)
            .await
            .map_err(DashboardError::from)
            .and_then(|game| game.ok_or_else(|| DashboardError::game_not_found(game_id)));
        let game = match updated {
            Ok(game) => game,
            Err(e) => {
                self.discard_upload(stored.as_deref()).await;
                return Err(e);
            }
        };
        tracing::info!(
            admin = %admin.username(),
            game_id,
            name = %game.name,
            "Game updated"
        );
        Ok(game)
    }

    /// Remove a game. Unknown ids are NotFound and write nothing.
    pub async fn delete_game(&self, admin: &Superuser, game_id: i64) -> Result<Game, DashboardError> {
        let game = self.find_game(game_id).await?;
        if !self.repos.games.delete(game_id).await? {
            return Err(DashboardError::game_not_found(game_id));
        }
        tracing::info!(admin = %admin.username(), game_id, name = %game.name, "Game deleted");
        Ok(game)
    }

    /// Remove a user account without checking what references it
    pub async fn delete_user(&self, admin: &Superuser, user_id: i64) -> Result<User, DashboardError> {
        let user = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DashboardError::user_not_found(user_id))?;
        if !self.repos.users.delete(user_id).await? {
            return Err(DashboardError::user_not_found(user_id));
        }
        tracing::info!(
            admin = %admin.username(),
            user_id,
            username = %user.username,
            "User deleted"
        );
        Ok(user)
    }

    async fn find_game(&self, game_id: i64) -> Result<Game, DashboardError> {
        self.repos
            .games
            .find_by_id(game_id)
            .await?
            .ok_or_else(|| DashboardError::game_not_found(game_id))
    }

    async fn store_upload(
        &self,
        upload: Option<&UploadedImage>,
    ) -> Result<Option<String>, DashboardError> {
        match upload {
            Some(image) => Ok(Some(self.media.save_game_image(image).await?)),
            None => Ok(None),
        }
    }

    /// Drop an upload whose game record was never written
    async fn discard_upload(&self, stored: Option<&str>) {
        let Some(relative) = stored else {
            return;
        };
        if let Err(e) = self.media.remove(relative).await {
            tracing::warn!(path = %relative, error = %e, "Failed to remove orphaned upload");
        }
    }
}
