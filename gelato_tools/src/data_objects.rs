//! Wire types for the Gelato Order, Shipment and Product APIs.
//!
//! Field names follow Gelato's camelCase JSON. Optional fields are modelled as `Option` rather than defaulted, so a
//! malformed vendor response fails deserialization instead of being silently coerced.

use serde::{Deserialize, Serialize};

//--------------------------------------     Order API       ---------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GelatoOrderRequest {
    /// Our identifier for the order. Gelato echoes this back in webhooks.
    pub order_reference_id: String,
    pub order_type: String,
    pub currency: String,
    pub items: Vec<GelatoOrderItem>,
    pub shipping_address: GelatoAddress,
}

impl GelatoOrderRequest {
    pub fn new(order_reference_id: String, items: Vec<GelatoOrderItem>, shipping_address: GelatoAddress) -> Self {
        Self { order_reference_id, order_type: "order".to_string(), currency: "USD".to_string(), items, shipping_address }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GelatoOrderItem {
    pub item_reference_id: String,
    /// The Gelato catalog product UID, e.g. `canvas_300x400-mm-12x16-inch_canvas_wood-fsc-slim_4-0_hor`
    pub product_uid: String,
    pub files: Vec<GelatoFile>,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GelatoFile {
    #[serde(rename = "type")]
    pub file_type: String,
    pub url: String,
}

impl GelatoFile {
    pub fn default_print_file(url: String) -> Self {
        Self { file_type: "default".to_string(), url }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GelatoAddress {
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub post_code: String,
    pub country: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GelatoOrderResponse {
    pub id: String,
    pub order_reference_id: String,
    pub fulfillment_status: String,
    #[serde(default)]
    pub financial_status: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

//--------------------------------------    Shipment API     ---------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    pub shipment_method_uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub method_type: String,
    #[serde(default)]
    pub is_business: bool,
    #[serde(default)]
    pub supported_countries: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentMethodsResponse {
    pub shipment_methods: Vec<ShippingMethod>,
}

//--------------------------------------     Product API     ---------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GelatoProduct {
    pub product_uid: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
    #[serde(default)]
    pub weight: Option<serde_json::Value>,
    #[serde(default)]
    pub supported_country_list: Vec<String>,
}

//--------------------------------------      Webhooks       ---------------------------------------------------------

/// The envelope Gelato posts to the fulfillment webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    pub topic: String,
    pub data: OrderStatusChanged,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusChanged {
    /// Gelato's own order id.
    #[serde(default)]
    pub order_id: Option<String>,
    /// The `orderReferenceId` we supplied at submission time.
    pub order_reference_id: String,
    pub fulfillment_status: String,
    #[serde(default)]
    pub tracking_code: Option<String>,
    #[serde(default)]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
}
