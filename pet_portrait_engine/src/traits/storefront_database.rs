use thiserror::Error;

use crate::{
    db_types::{Customer, NewCustomer, NewOrder, Order, OrderEvent, OrderEventType, OrderId, OrderStatusType},
    order_objects::{FulfillmentUpdate, OrderQueryFilter},
};

#[derive(Debug, Clone, Error)]
pub enum StorefrontApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error("Customer {0} does not exist")]
    CustomerNotFound(i64),
    #[error("The requested modification would have no effect")]
    ModificationNoOp,
}

impl From<sqlx::Error> for StorefrontApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// The order/customer/audit persistence behaviour for the storefront.
///
/// This includes:
/// * The transactional checkout write (customer upsert + order insert + audit event).
/// * Order lookup, search and status transitions.
/// * Fulfillment bookkeeping (vendor order id, tracking details).
/// * The append-only audit log.
#[allow(async_fn_in_trait)]
pub trait StorefrontDatabase: Clone {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Persist a checkout in a single transaction: upsert the customer by email (overwriting address fields),
    /// insert the order with `Paid` status, and append a `payment_succeeded` audit event.
    ///
    /// The call is idempotent on the public order id: if the order already exists, the existing row is returned and
    /// the second element is `false`.
    async fn insert_checkout(
        &self,
        customer: NewCustomer,
        order: NewOrder,
    ) -> Result<(Customer, Order, bool), StorefrontApiError>;

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, StorefrontApiError>;

    async fn fetch_customer(&self, customer_id: i64) -> Result<Option<Customer>, StorefrontApiError>;

    /// Fetch orders matching the given filter, oldest first.
    async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, StorefrontApiError>;

    /// Set the order status and append a `status_changed` audit event carrying the reason.
    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatusType,
        reason: &str,
    ) -> Result<Order, StorefrontApiError>;

    /// Record a successful print-vendor submission: store the vendor order id, advance the status to `Processing`
    /// and append a `gelato_order_created` audit event. One transaction.
    async fn record_fulfillment_created(
        &self,
        order_id: &OrderId,
        vendor_order_id: &str,
    ) -> Result<Order, StorefrontApiError>;

    /// Record a failed print-vendor submission as a `gelato_submission_failed` audit event. The order itself is
    /// left untouched; the customer has already paid.
    async fn record_fulfillment_failure(&self, order_id: &OrderId, error: &str) -> Result<(), StorefrontApiError>;

    /// Apply a fulfillment-status update from the vendor webhook: status, tracking number and carrier, plus a
    /// `status_changed` audit event. Re-delivery of the same update converges to the same row.
    async fn apply_fulfillment_update(
        &self,
        update: &FulfillmentUpdate,
        new_status: OrderStatusType,
    ) -> Result<Order, StorefrontApiError>;

    async fn insert_order_event(
        &self,
        order_pk: i64,
        event_type: OrderEventType,
        metadata: serde_json::Value,
    ) -> Result<(), StorefrontApiError>;

    async fn fetch_order_events(&self, order_id: &OrderId) -> Result<Vec<OrderEvent>, StorefrontApiError>;

    /// Hard-delete an order and its audit events in one transaction. Returns the deleted row.
    async fn delete_order(&self, order_id: &OrderId) -> Result<Order, StorefrontApiError>;
}
