//! Typed view-models, one per dashboard screen

use serde::Serialize;

use super::reporting::OrderRow;
use super::search::Listing;
use crate::account::User;
use crate::audit::AuditLogEntry;
use crate::catalog::{FieldErrors, Game, GameForm};
use crate::money::Money;

/// Summary screen
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub logs: Vec<AuditLogEntry>,
    pub all_games: Vec<Game>,
    pub all_users: Vec<User>,
    pub all_orders: Vec<OrderRow>,
    pub total_sales: Money,
}

/// Games / users / orders management screens
#[derive(Debug, Clone, Serialize)]
pub struct ManagementView<T> {
    #[serde(flatten)]
    pub listing: Listing<T>,
    /// Over all orders, whatever the screen is filtering
    pub total_sales: Money,
}

/// Add / edit game form screen
#[derive(Debug, Clone, Serialize)]
pub struct GameFormView {
    /// The game being edited; `None` when adding
    pub game: Option<Game>,
    pub form: GameForm,
    pub errors: FieldErrors,
    pub image_url: Option<String>,
}
