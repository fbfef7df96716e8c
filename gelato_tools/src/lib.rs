//! A thin, typed client for the Gelato print-on-demand APIs.
//!
//! Gelato splits its surface over three hosts: the Order API (v4) for submitting and managing print jobs, the
//! Shipment API (v1) for shipping-method discovery, and the Product API (v3) for catalog lookups. This crate wraps
//! all three behind [`GelatoApi`] and knows nothing about the storefront; the data objects mirror the vendor's wire
//! format and nothing else.

mod api;
mod config;
mod error;

pub mod data_objects;

pub use api::GelatoApi;
pub use config::GelatoConfig;
pub use data_objects::{
    GelatoAddress,
    GelatoFile,
    GelatoOrderItem,
    GelatoOrderRequest,
    GelatoOrderResponse,
    GelatoProduct,
    OrderStatusChanged,
    ShippingMethod,
    WebhookEnvelope,
};
pub use error::GelatoApiError;
