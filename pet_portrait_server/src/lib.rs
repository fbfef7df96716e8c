//! # Pet Portrait Gateway server
//!
//! This crate hosts the HTTP surface for the pet-portrait storefront. It is responsible for:
//! * Accepting checkout submissions from the storefront, validating the price server-side, and persisting paid
//!   orders.
//! * Submitting paid orders to the Gelato print API off the request path, via the engine's event hooks.
//! * Receiving fulfillment-status webhooks from Gelato (HMAC-verified) and applying them to orders.
//! * Discount verification, the marketing campaign banner, the blog, the newsletter list and the Google Merchant
//!   product feed.
//! * An admin back-office behind a bearer-token middleware.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.

pub mod config;
pub mod data_objects;
pub mod errors;
pub mod feed;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod webhook_routes;

#[cfg(test)]
mod endpoint_tests;
