//! Storefront orders (read-only in the dashboard)

pub mod models;
pub mod repository;

pub use models::Order;
pub use repository::{OrderRepository, PgOrderRepository};
