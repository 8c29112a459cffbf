use std::sync::Arc;

use axum::{Extension, extract::State};

use crate::dashboard::{DashboardError, DashboardView};
use crate::user_auth::{Principal, Superuser};

use super::super::response::Page;
use super::super::screen::templates;
use super::super::state::AppState;

/// GET /dashboard/
#[utoipa::path(
    get,
    path = "/dashboard/",
    responses(
        (status = 200, description = "Recent admin actions, all games, users and orders, total sales"),
        (status = 303, description = "Not a superuser, or no session")
    ),
    security(("session_token" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Extension(admin): Extension<Superuser>,
) -> Result<Page<DashboardView>, DashboardError> {
    let view = state.service.dashboard(&admin).await?;
    Ok(state.render(&principal, templates::DASHBOARD, view))
}
