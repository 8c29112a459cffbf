//! Session handling for the dashboard
//!
//! Tokens are issued by the storefront's login flow (HS256 JWT, subject =
//! user id). This module only verifies them, resolves the current
//! `Principal`, and gates admin routes behind the `Superuser` capability.

pub mod middleware;
pub mod principal;
pub mod service;

pub use middleware::{SessionError, admit_superuser, authenticate, session_middleware, superuser_guard};
pub use principal::{Principal, Superuser};
pub use service::{Claims, SessionKeys};
