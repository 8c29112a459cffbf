//! Admin audit log (written by the storefront's admin site, read here)

pub mod models;
pub mod repository;

pub use models::{ActionFlag, AuditLogEntry};
pub use repository::{AuditLogRepository, PgAuditLogRepository};
