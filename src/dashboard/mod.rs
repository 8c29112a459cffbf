//! Admin dashboard: listing and search, sales reporting, and the superuser
//! operations over games and users

pub mod error;
pub mod reporting;
pub mod search;
pub mod service;
pub mod views;

pub use error::DashboardError;
pub use reporting::{OrderRow, compute_order_tax, compute_sales_total};
pub use search::{Listing, SearchError, SearchQuery, Searchable};
pub use service::ManagementService;
pub use views::{DashboardView, GameFormView, ManagementView};
