//! Customer accounts
//!
//! Accounts are created by the storefront's registration flow. The dashboard
//! only lists, searches and deletes them.

pub mod models;
pub mod repository;

pub use models::User;
pub use repository::{PgUserRepository, UserRepository};
