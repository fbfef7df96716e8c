//! Pet Portrait Engine
//!
//! The engine contains everything about the storefront that is not HTTP: the static pricing catalog and price
//! calculation, the checkout order flow (price validation, transactional persistence, audit events), discount and
//! campaign verification, fulfillment-status mapping for the print vendor, and the blog/newsletter persistence.
//!
//! The library is divided into two main sections:
//! 1. Database management ([`mod@sqlite`]). SQLite is the supported backend. You should never need to access the
//!    database directly; use the public APIs instead. The exception is the data types used in the database, which are
//!    defined in the `db_types` module and are public.
//! 2. The engine public API ([`mod@api`]). Specific backends implement the traits in [`mod@traits`] in order to act
//!    as a backend for the portrait server.
//!
//! The engine also provides a set of events that can be subscribed to. When a checkout is persisted an
//! [`events::OrderPaidEvent`] is emitted; the server hooks the print-vendor submission onto it so that a vendor
//! outage can never fail a paid order.

mod api;
pub mod db_types;
pub mod events;
pub mod fulfillment;
pub mod order_objects;
pub mod pricing;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use api::{BlogApi, CatalogApi, MarketingApi, OrderFlowApi, OrderFlowError, VerifiedDiscount};

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;
