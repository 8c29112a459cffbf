//! Game catalog: models, the admin game form, and game storage

pub mod form;
pub mod models;
pub mod repository;

pub use form::{FieldErrors, GameForm, UploadedImage};
pub use models::{Game, GameDraft};
pub use repository::{GameRepository, PgGameRepository};
