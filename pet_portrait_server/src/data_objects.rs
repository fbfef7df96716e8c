use std::fmt::Display;

use chrono::{DateTime, Utc};
use pet_portrait_engine::db_types::{NewCustomer, NewOrder, OrderId, OrderStatusType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// The checkout payload the storefront submits once PayPal has approved the payment client-side.
///
/// The customer contact and address fields are flattened into the top level of the JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(flatten)]
    pub customer: NewCustomer,
    pub product_type: String,
    pub size: String,
    /// What the client claims was charged, in whole USD. Compared against the calculated price, never stored.
    pub price: i64,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub storage_folder: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub paypal_order_id: Option<String>,
    /// Optional client-generated order id. If absent the server generates one.
    #[serde(default)]
    pub order_id: Option<OrderId>,
}

impl CreateOrderRequest {
    pub fn into_parts(self) -> (NewCustomer, NewOrder, i64) {
        let mut order = NewOrder::new(self.product_type, self.size);
        if let Some(order_id) = self.order_id {
            order.order_id = order_id;
        }
        order.photo_urls = self.photo_urls;
        order.storage_folder = self.storage_folder;
        order.notes = self.notes;
        order.paypal_order_id = self.paypal_order_id;
        (self.customer, order, self.price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_id: OrderId,
    pub status: OrderStatusType,
    /// The persisted (server-calculated) price, in whole USD.
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusParams {
    pub order_id: OrderId,
    pub status: OrderStatusType,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIdParams {
    pub order_id: OrderId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingMethodsQuery {
    #[serde(default)]
    pub country: Option<String>,
}
