use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
};

use crate::dashboard::DashboardError;
use crate::user_auth::{Principal, Superuser};

use super::super::flash::FlashMessage;
use super::super::response::Page;
use super::super::screen::Screen;
use super::super::state::AppState;

/// POST /dashboard/delete_user/{user_id}/
#[utoipa::path(
    post,
    path = "/dashboard/delete_user/{user_id}/",
    params(("user_id" = i64, Path, description = "User to delete")),
    responses(
        (status = 303, description = "Deleted; redirected to users management"),
        (status = 404, description = "Unknown user")
    ),
    security(("session_token" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Extension(admin): Extension<Superuser>,
    Path(user_id): Path<i64>,
) -> Result<Page<()>, DashboardError> {
    state.service.delete_user(&admin, user_id).await?;
    // Nobody will ever render screens for a deleted account
    state.flash.take(user_id);
    Ok(state.redirect(
        &principal,
        Screen::UsersManagement,
        FlashMessage::success("User deleted!"),
    ))
}
