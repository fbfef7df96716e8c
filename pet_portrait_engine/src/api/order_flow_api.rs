use std::fmt::Debug;

use log::*;
use ppg_common::UsdAmount;
use thiserror::Error;

use crate::{
    db_types::{Customer, NewCustomer, NewOrder, Order, OrderEvent, OrderId, OrderStatusType},
    events::{EventProducers, OrderPaidEvent, OrderStatusChangedEvent},
    fulfillment::map_fulfillment_status,
    order_objects::{FulfillmentUpdate, OrderQueryFilter, OrderResult},
    pricing::{calculate_price, PricingError},
    traits::{StorefrontApiError, StorefrontDatabase},
};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Invalid product selection. {0}")]
    Pricing(#[from] PricingError),
    #[error("Submitted price {given} is less than the calculated price {expected}")]
    Underpayment { expected: UsdAmount, given: UsdAmount },
    #[error("Order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error(transparent)]
    Backend(#[from] StorefrontApiError),
}

/// `OrderFlowApi` owns the checkout pipeline and all subsequent order mutations: price validation, the transactional
/// persistence of a paid order, fulfillment bookkeeping, vendor webhook transitions, and the admin operations.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> OrderFlowApi<B>
where B: StorefrontDatabase
{
    /// Run the checkout pipeline for a captured payment.
    ///
    /// 1. Recompute the price from the static tables. Unknown product type or size is a hard rejection; there is no
    ///    fallback to the client-submitted price.
    /// 2. Reject if the client paid less than the calculated price. If the client paid more (or float noise crept
    ///    in), the *calculated* price is stored.
    /// 3. Persist customer + order + `payment_succeeded` event in one transaction.
    /// 4. Fire the `OrderPaidEvent` hook so the vendor submission can run off the request path.
    ///
    /// Returns the persisted order and whether it was freshly inserted (`false` means the order id was already
    /// known and the stored row is returned unchanged).
    pub async fn process_checkout(
        &self,
        customer: NewCustomer,
        mut order: NewOrder,
        client_price: UsdAmount,
    ) -> Result<(Order, bool), OrderFlowError> {
        let calculated = calculate_price(&order.product_type, &order.size)?;
        if client_price < calculated {
            warn!(
                "🎨️ Underpayment attempt on order [{}]: submitted {client_price}, expected {calculated}",
                order.order_id
            );
            return Err(OrderFlowError::Underpayment { expected: calculated, given: client_price });
        }
        if client_price != calculated {
            info!(
                "🎨️ Client price {client_price} differs from calculated price {calculated} for order [{}]. Storing \
                 the calculated price.",
                order.order_id
            );
        }
        order.total_price = calculated;
        let (customer, order, inserted) = self.db.insert_checkout(customer, order).await?;
        if inserted {
            debug!("🎨️ Order [{}] persisted with status {}", order.order_id, order.status);
            self.call_order_paid_hook(&order, &customer).await;
        } else {
            info!("🎨️ Order [{}] already exists. Returning the stored record.", order.order_id);
        }
        Ok((order, inserted))
    }

    async fn call_order_paid_hook(&self, order: &Order, customer: &Customer) {
        for emitter in &self.producers.order_paid_producer {
            debug!("🎨️ Notifying order-paid hook subscribers for [{}]", order.order_id);
            let event = OrderPaidEvent::new(order.clone(), customer.clone());
            emitter.publish_event(event).await;
        }
    }

    async fn call_status_changed_hook(&self, order: &Order, old_status: OrderStatusType) {
        for emitter in &self.producers.status_changed_producer {
            let event = OrderStatusChangedEvent::new(order.clone(), old_status);
            emitter.publish_event(event).await;
        }
    }

    /// Record a successful print-vendor submission against the order and advance it to `Processing`.
    pub async fn record_fulfillment_created(
        &self,
        order_id: &OrderId,
        vendor_order_id: &str,
    ) -> Result<Order, OrderFlowError> {
        let order = self.db.record_fulfillment_created(order_id, vendor_order_id).await?;
        info!("🖨️️ Order [{order_id}] submitted to the print vendor as {vendor_order_id}");
        self.call_status_changed_hook(&order, OrderStatusType::Paid).await;
        Ok(order)
    }

    /// Record a failed print-vendor submission. Deliberately does not touch the order row: the payment has been
    /// captured, so the order stays `Paid` and an admin follows up from the audit log.
    pub async fn record_fulfillment_failure(&self, order_id: &OrderId, error: &str) -> Result<(), OrderFlowError> {
        warn!("🖨️️ Print-vendor submission failed for [{order_id}]: {error}");
        self.db.record_fulfillment_failure(order_id, error).await?;
        Ok(())
    }

    /// Apply a fulfillment-status webhook from the vendor. The vendor status string is mapped onto the internal
    /// enum; unknown strings map to `Processing`. Repeated deliveries of the same payload are harmless.
    pub async fn process_fulfillment_update(&self, update: FulfillmentUpdate) -> Result<Order, OrderFlowError> {
        let order = self
            .db
            .fetch_order_by_order_id(&update.order_reference)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(update.order_reference.clone()))?;
        let old_status = order.status;
        let new_status = map_fulfillment_status(&update.vendor_status);
        let order = self.db.apply_fulfillment_update(&update, new_status).await?;
        debug!(
            "🖨️️ Fulfillment update for [{}]: vendor status '{}' -> {new_status} (was {old_status})",
            order.order_id, update.vendor_status
        );
        if old_status != new_status {
            self.call_status_changed_hook(&order, old_status).await;
        }
        Ok(order)
    }

    /// Manual status change from the admin back-office.
    pub async fn update_status(
        &self,
        order_id: &OrderId,
        status: OrderStatusType,
        reason: &str,
    ) -> Result<Order, OrderFlowError> {
        let current = self
            .db
            .fetch_order_by_order_id(order_id)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(order_id.clone()))?;
        let old_status = current.status;
        let order = self.db.update_order_status(order_id, status, reason).await?;
        info!("🎨️ Order [{order_id}] status changed {old_status} -> {status}. Reason: {reason}");
        self.call_status_changed_hook(&order, old_status).await;
        Ok(order)
    }

    pub async fn search_orders(&self, query: OrderQueryFilter) -> Result<OrderResult, OrderFlowError> {
        let orders = self.db.search_orders(query).await?;
        let total_orders = orders.iter().map(|o| o.total_price).sum();
        Ok(OrderResult { total_orders, orders })
    }

    pub async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<Order>, OrderFlowError> {
        Ok(self.db.fetch_order_by_order_id(order_id).await?)
    }

    pub async fn fetch_customer_for_order(&self, order: &Order) -> Result<Option<Customer>, OrderFlowError> {
        Ok(self.db.fetch_customer(order.customer_id).await?)
    }

    pub async fn fetch_order_events(&self, order_id: &OrderId) -> Result<Vec<OrderEvent>, OrderFlowError> {
        Ok(self.db.fetch_order_events(order_id).await?)
    }

    /// Hard delete, cascading to the order's audit events.
    pub async fn delete_order(&self, order_id: &OrderId) -> Result<Order, OrderFlowError> {
        let order = self.db.delete_order(order_id).await?;
        info!("🎨️ Order [{order_id}] deleted, along with its audit events");
        Ok(order)
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
