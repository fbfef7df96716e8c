use serde::{Deserialize, Serialize};

use crate::db_types::{Customer, Order, OrderStatusType};

/// Fired once a checkout has been persisted with `Paid` status. Carries the customer row so the fulfillment handler
/// has the shipping address without a second database round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPaidEvent {
    pub order: Order,
    pub customer: Customer,
}

impl OrderPaidEvent {
    pub fn new(order: Order, customer: Customer) -> Self {
        Self { order, customer }
    }
}

/// Fired when an order's status changes after creation, whether by an admin or a vendor webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusChangedEvent {
    pub order: Order,
    pub old_status: OrderStatusType,
    pub new_status: OrderStatusType,
}

impl OrderStatusChangedEvent {
    pub fn new(order: Order, old_status: OrderStatusType) -> Self {
        let new_status = order.status;
        Self { order, old_status, new_status }
    }
}
