//! HTTP handlers for the dashboard gateway

pub mod dashboard;
pub mod games;
pub mod health;
pub mod management;
pub mod users;

pub use dashboard::dashboard;
pub use games::{add_game, add_game_form, delete_game, edit_game, edit_game_form};
pub use health::{HealthResponse, health_check};
pub use management::{SearchParams, games_management, orders_management, users_management};
pub use users::delete_user;
