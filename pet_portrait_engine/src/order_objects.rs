use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db_types::{Order, OrderId, OrderStatusType};

/// Search criteria for the admin order list. Every field is optional; an empty filter returns everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQueryFilter {
    pub order_id: Option<OrderId>,
    pub customer_email: Option<String>,
    pub product_type: Option<String>,
    pub status: Option<Vec<OrderStatusType>>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl OrderQueryFilter {
    pub fn is_empty(&self) -> bool {
        self.order_id.is_none()
            && self.customer_email.is_none()
            && self.product_type.is_none()
            && self.status.as_ref().map(|s| s.is_empty()).unwrap_or(true)
            && self.since.is_none()
            && self.until.is_none()
    }

    pub fn with_order_id(mut self, id: OrderId) -> Self {
        self.order_id = Some(id);
        self
    }

    pub fn with_status(mut self, status: OrderStatusType) -> Self {
        self.status.get_or_insert_with(Vec::new).push(status);
        self
    }

    pub fn with_customer_email<S: Into<String>>(mut self, email: S) -> Self {
        self.customer_email = Some(email.into());
        self
    }
}

impl Display for OrderQueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut clauses = vec![];
        if let Some(id) = &self.order_id {
            clauses.push(format!("order_id={id}"));
        }
        if let Some(email) = &self.customer_email {
            clauses.push(format!("email={email}"));
        }
        if let Some(pt) = &self.product_type {
            clauses.push(format!("product_type={pt}"));
        }
        if let Some(statuses) = &self.status {
            let s = statuses.iter().map(|s| s.to_string()).collect::<Vec<_>>().join("|");
            clauses.push(format!("status={s}"));
        }
        if let Some(since) = &self.since {
            clauses.push(format!("since={since}"));
        }
        if let Some(until) = &self.until {
            clauses.push(format!("until={until}"));
        }
        write!(f, "{}", clauses.join(","))
    }
}

/// The result of an admin search: matching orders plus their total value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub total_orders: ppg_common::UsdAmount,
    pub orders: Vec<Order>,
}

/// A fulfillment-status change reported by the print vendor, after topic filtering and before status mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentUpdate {
    /// The order reference the vendor echoes back; this is our public order id.
    pub order_reference: OrderId,
    pub vendor_status: String,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
}
