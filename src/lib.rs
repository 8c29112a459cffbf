//! Game store admin dashboard
//!
//! Superuser-gated management of a game store's catalog and accounts, with
//! searchable listings of games, users and orders and a sales summary.
//!
//! # Modules
//!
//! - [`catalog`] - Games, the admin game form, game storage
//! - [`account`] - Customer accounts
//! - [`checkout`] - Orders (read-only)
//! - [`audit`] - Admin audit log (read-only)
//! - [`money`] - Decimal money parsing and formatting
//! - [`store`] - Repository wiring for PostgreSQL or the in-memory store
//! - [`dashboard`] - Listing/search, sales reporting, admin operations
//! - [`user_auth`] - Sessions, principals and the superuser capability
//! - [`media`] - Uploaded image storage
//! - [`gateway`] - axum HTTP surface

// Domain
pub mod account;
pub mod audit;
pub mod catalog;
pub mod checkout;
pub mod money;

// Storage
pub mod db;
pub mod media;
pub mod store;

// Dashboard
pub mod dashboard;
pub mod gateway;
pub mod user_auth;

// Configuration & Logging
pub mod config;
pub mod logging;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use dashboard::{DashboardError, ManagementService};
pub use gateway::state::AppState;
pub use money::Money;
pub use store::{MemoryStore, Repositories, Seed, StoreError};
pub use user_auth::{Principal, SessionKeys, Superuser};
