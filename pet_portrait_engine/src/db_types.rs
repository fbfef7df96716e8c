use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use ppg_common::UsdAmount;
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, Type};
use thiserror::Error;

//--------------------------------------   OrderStatusType   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// Payment has been captured; the order has not been handed to the print vendor yet.
    Paid,
    /// The print vendor has accepted the order.
    Processing,
    /// The vendor has started printing.
    InProgress,
    /// The physical print has shipped.
    Shipped,
    /// The print was delivered.
    Completed,
    /// The order was cancelled, either by an admin or by the vendor.
    Cancelled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Paid => write!(f, "Paid"),
            OrderStatusType::Processing => write!(f, "Processing"),
            OrderStatusType::InProgress => write!(f, "InProgress"),
            OrderStatusType::Shipped => write!(f, "Shipped"),
            OrderStatusType::Completed => write!(f, "Completed"),
            OrderStatusType::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid conversion: {0}")]
pub struct ConversionError(pub String);

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paid" => Ok(Self::Paid),
            "Processing" => Ok(Self::Processing),
            "InProgress" => Ok(Self::InProgress),
            "Shipped" => Ok(Self::Shipped),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status in database: {value}. Defaulting to Paid");
            OrderStatusType::Paid
        })
    }
}

//--------------------------------------        OrderId        -------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    /// Generate a fresh storefront order id, `PP-` followed by 10 alphanumeric characters.
    pub fn random() -> Self {
        let suffix: String = rand::thread_rng().sample_iter(&Alphanumeric).take(10).map(char::from).collect();
        Self(format!("PP-{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_id: OrderId,
    pub customer_id: i64,
    pub product_type: String,
    pub size: String,
    /// Always the server-calculated price, never the client-submitted one.
    pub total_price: UsdAmount,
    pub photo_urls: Json<Vec<String>>,
    pub storage_folder: Option<String>,
    pub notes: Option<String>,
    pub status: OrderStatusType,
    pub paypal_order_id: Option<String>,
    pub vendor_order_id: Option<String>,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewOrder      ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// The public order id. Generated by the storefront if the client did not supply one.
    pub order_id: OrderId,
    pub product_type: String,
    pub size: String,
    /// The price to persist. The order flow overwrites this with the calculated price before insertion.
    pub total_price: UsdAmount,
    pub photo_urls: Vec<String>,
    pub storage_folder: Option<String>,
    pub notes: Option<String>,
    pub paypal_order_id: Option<String>,
}

impl NewOrder {
    pub fn new<S1: Into<String>, S2: Into<String>>(product_type: S1, size: S2) -> Self {
        Self {
            order_id: OrderId::random(),
            product_type: product_type.into(),
            size: size.into(),
            total_price: UsdAmount::default(),
            photo_urls: Vec::new(),
            storage_folder: None,
            notes: None,
            paypal_order_id: None,
        }
    }
}

//--------------------------------------       Customer      ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// A shipping address is complete enough to hand to the print vendor when the street, city, postal code and
    /// country are all present.
    pub fn has_complete_address(&self) -> bool {
        !(self.address_line1.is_empty()
            || self.city.is_empty()
            || self.postal_code.is_empty()
            || self.country.is_empty())
    }
}

/// Customer details as submitted at checkout. Upserted by email; the address fields overwrite whatever was stored
/// from any previous order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

//--------------------------------------   OrderEventType    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderEventType {
    PaymentSucceeded,
    GelatoOrderCreated,
    GelatoSubmissionFailed,
    StatusChanged,
}

impl Display for OrderEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEventType::PaymentSucceeded => write!(f, "payment_succeeded"),
            OrderEventType::GelatoOrderCreated => write!(f, "gelato_order_created"),
            OrderEventType::GelatoSubmissionFailed => write!(f, "gelato_submission_failed"),
            OrderEventType::StatusChanged => write!(f, "status_changed"),
        }
    }
}

impl FromStr for OrderEventType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment_succeeded" => Ok(Self::PaymentSucceeded),
            "gelato_order_created" => Ok(Self::GelatoOrderCreated),
            "gelato_submission_failed" => Ok(Self::GelatoSubmissionFailed),
            "status_changed" => Ok(Self::StatusChanged),
            s => Err(ConversionError(format!("Invalid order event type: {s}"))),
        }
    }
}

impl From<String> for OrderEventType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order event type in database: {value}. Defaulting to status_changed");
            OrderEventType::StatusChanged
        })
    }
}

//--------------------------------------     OrderEvent      ---------------------------------------------------------
/// Append-only audit record attached to an order. The pipeline only ever writes these; admins read them when a
/// fulfillment failure needs manual follow-up.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderEvent {
    pub id: i64,
    /// References `orders.id`, not the public order id.
    pub order_id: i64,
    #[sqlx(rename = "event_type")]
    pub event_type: String,
    pub metadata: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------       Product       ---------------------------------------------------------
/// A catalog override row. The static defaults live in [`crate::pricing`]; rows here take precedence.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_type: String,
    pub name: String,
    pub base_price: UsdAmount,
    pub plan: String,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub product_type: String,
    pub name: String,
    pub base_price: UsdAmount,
    pub plan: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

//--------------------------------------    DiscountCode     ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DiscountCode {
    pub id: i64,
    pub code: String,
    pub percent: i64,
    pub description: Option<String>,
    pub active: bool,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiscountCode {
    pub code: String,
    pub percent: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

//--------------------------------------  MarketingCampaign  ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MarketingCampaign {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub percent: i64,
    pub description: Option<String>,
    pub active: bool,
    pub usage_count: i64,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MarketingCampaign {
    /// Active flag plus the optional date window.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.active
            && self.starts_at.map(|s| s <= now).unwrap_or(true)
            && self.ends_at.map(|e| e >= now).unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub code: String,
    pub percent: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

//--------------------------------------        Post         ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub published: bool,
}
