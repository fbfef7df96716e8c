//! The static pricing catalog.
//!
//! Prices are a base amount per product type multiplied by a size modifier, rounded to the nearest whole dollar.
//! This is the one server-trusted source of prices: whatever a client submits at checkout is only ever *compared*
//! against [`calculate_price`], never stored.

use ppg_common::UsdAmount;
use thiserror::Error;

/// (product type, display name, base price in whole USD, plan tier)
pub const PRODUCT_TABLE: &[(&str, &str, i64, &str)] = &[
    ("canvas", "Classic Canvas Portrait", 129, "classic"),
    ("framed_canvas", "Framed Canvas Portrait", 179, "signature"),
    ("poster", "Premium Poster Print", 59, "classic"),
    ("metal", "Metal Print Portrait", 149, "masterpiece"),
    ("digital", "Digital Portrait File", 39, "gift"),
];

/// (size key, price modifier)
pub const SIZE_TABLE: &[(&str, f64)] = &[
    ("8x10", 0.7),
    ("12x16", 1.0),
    ("16x20", 1.3),
    ("18x24", 1.6),
    ("24x36", 2.2),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Unknown product type: {0}")]
    UnknownProductType(String),
    #[error("Unknown size: {0}")]
    UnknownSize(String),
}

/// The base price for a product type, in whole dollars.
pub fn base_price(product_type: &str) -> Option<i64> {
    PRODUCT_TABLE.iter().find(|(k, ..)| *k == product_type).map(|(_, _, price, _)| *price)
}

pub fn size_modifier(size: &str) -> Option<f64> {
    SIZE_TABLE.iter().find(|(k, _)| *k == size).map(|(_, m)| *m)
}

pub fn plan_for(product_type: &str) -> Option<&'static str> {
    PRODUCT_TABLE.iter().find(|(k, ..)| *k == product_type).map(|(.., plan)| *plan)
}

/// The server-side price for a (product type, size) pair: `round(base * modifier)` in whole dollars, returned in
/// cents. Unknown keys are hard errors; there is deliberately no fallback to a client-supplied price.
pub fn calculate_price(product_type: &str, size: &str) -> Result<UsdAmount, PricingError> {
    let base = base_price(product_type).ok_or_else(|| PricingError::UnknownProductType(product_type.to_string()))?;
    let modifier = size_modifier(size).ok_or_else(|| PricingError::UnknownSize(size.to_string()))?;
    #[allow(clippy::cast_possible_truncation)]
    let dollars = (base as f64 * modifier).round() as i64;
    Ok(UsdAmount::from_dollars(dollars))
}

/// A resolved catalog entry, used by the admin catalog view and the merchant feed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CatalogEntry {
    pub product_type: String,
    pub name: String,
    pub base_price: UsdAmount,
    pub plan: String,
    pub image_url: Option<String>,
    pub active: bool,
}

/// The built-in catalog before any database overrides are applied.
pub fn static_catalog() -> Vec<CatalogEntry> {
    PRODUCT_TABLE
        .iter()
        .map(|(product_type, name, price, plan)| CatalogEntry {
            product_type: product_type.to_string(),
            name: name.to_string(),
            base_price: UsdAmount::from_dollars(*price),
            plan: plan.to_string(),
            image_url: None,
            active: true,
        })
        .collect()
}
