//! Games, users and orders management screens
//!
//! Open to any logged-in principal. An empty `q` sends the principal back to
//! the same screen with the search error flashed.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::account::User;
use crate::catalog::Game;
use crate::dashboard::{DashboardError, ManagementView, OrderRow};
use crate::user_auth::Principal;

use super::super::flash::FlashMessage;
use super::super::response::Page;
use super::super::screen::{Screen, templates};
use super::super::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text filter; must not be empty when present
    pub q: Option<String>,
}

fn screen_or_retry<V>(
    state: &AppState,
    principal: &Principal,
    result: Result<V, DashboardError>,
    template: &'static str,
    screen: Screen,
) -> Result<Page<V>, DashboardError> {
    match result {
        Ok(view) => Ok(state.render(principal, template, view)),
        Err(DashboardError::Search(e)) => {
            Ok(state.redirect(principal, screen, FlashMessage::error(e.to_string())))
        }
        Err(e) => Err(e),
    }
}

/// GET /dashboard/games_management/
#[utoipa::path(
    get,
    path = "/dashboard/games_management/",
    params(SearchParams),
    responses(
        (status = 200, description = "Games listing with the filtered view and total sales"),
        (status = 303, description = "Empty search term, or no session")
    ),
    security(("session_token" = [])),
    tag = "Management"
)]
pub async fn games_management(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<SearchParams>,
) -> Result<Page<ManagementView<Game>>, DashboardError> {
    let result = state.service.games_screen(params.q.as_deref()).await;
    screen_or_retry(
        &state,
        &principal,
        result,
        templates::GAMES_MANAGEMENT,
        Screen::GamesManagement,
    )
}

/// GET /dashboard/users_management/
#[utoipa::path(
    get,
    path = "/dashboard/users_management/",
    params(SearchParams),
    responses(
        (status = 200, description = "Users listing with the filtered view and total sales"),
        (status = 303, description = "Empty search term, or no session")
    ),
    security(("session_token" = [])),
    tag = "Management"
)]
pub async fn users_management(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<SearchParams>,
) -> Result<Page<ManagementView<User>>, DashboardError> {
    let result = state.service.users_screen(params.q.as_deref()).await;
    screen_or_retry(
        &state,
        &principal,
        result,
        templates::USERS_MANAGEMENT,
        Screen::UsersManagement,
    )
}

/// GET /dashboard/orders_management/
#[utoipa::path(
    get,
    path = "/dashboard/orders_management/",
    params(SearchParams),
    responses(
        (status = 200, description = "Orders listing, each with its tax, and total sales"),
        (status = 303, description = "Empty search term, or no session")
    ),
    security(("session_token" = [])),
    tag = "Management"
)]
pub async fn orders_management(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<SearchParams>,
) -> Result<Page<ManagementView<OrderRow>>, DashboardError> {
    let result = state.service.orders_screen(params.q.as_deref()).await;
    screen_or_retry(
        &state,
        &principal,
        result,
        templates::ORDERS_MANAGEMENT,
        Screen::OrdersManagement,
    )
}
