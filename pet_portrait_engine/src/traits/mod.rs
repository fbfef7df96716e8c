//! The traits a database backend must implement to drive the storefront engine.
//!
//! The public APIs in [`crate::api`] are generic over these traits; the SQLite backend in [`crate::sqlite`] is the
//! production implementation, and the server's endpoint tests mock them.

mod blog_management;
mod catalog_management;
mod marketing_management;
mod storefront_database;

pub use blog_management::BlogManagement;
pub use catalog_management::CatalogManagement;
pub use marketing_management::MarketingManagement;
pub use storefront_database::{StorefrontApiError, StorefrontDatabase};
