//! Data models for the game catalog

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::money::Money;

/// A game listed in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Game {
    pub id: i64,
    #[schema(example = "Hollow Knight")]
    pub name: String,
    pub description: String,
    #[schema(example = "PC")]
    pub platform: String,
    #[schema(value_type = String, example = "14.99")]
    pub price: Money,
    /// Media path of the cover image, relative to the media root
    pub image: Option<String>,
}

/// Validated game payload, ready to be inserted or written over an existing game
#[derive(Debug, Clone, PartialEq)]
pub struct GameDraft {
    pub name: String,
    pub description: String,
    pub platform: String,
    pub price: Money,
    pub image: Option<String>,
}

impl GameDraft {
    pub fn into_game(self, id: i64) -> Game {
        Game {
            id,
            name: self.name,
            description: self.description,
            platform: self.platform,
            price: self.price,
            image: self.image,
        }
    }
}
