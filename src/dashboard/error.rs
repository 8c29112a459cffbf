use thiserror::Error;

use super::search::SearchError;
use crate::catalog::FieldErrors;
use crate::media::MediaError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Sorry, only admin users can do that.")]
    AccessDenied,

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("Malformed form submission: {0}")]
    MalformedForm(String),

    #[error("Submitted game form is invalid")]
    InvalidGameForm(FieldErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DashboardError {
    pub fn game_not_found(id: i64) -> Self {
        Self::NotFound { entity: "Game", id }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound { entity: "User", id }
    }
}
