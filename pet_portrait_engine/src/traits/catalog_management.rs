use crate::{
    db_types::{NewProduct, Product},
    traits::StorefrontApiError,
};

/// Admin-editable overrides of the static pricing catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement: Clone {
    async fn fetch_product_overrides(&self) -> Result<Vec<Product>, StorefrontApiError>;

    /// Insert an override row, or update the existing one with the same product type.
    async fn upsert_product(&self, product: NewProduct) -> Result<Product, StorefrontApiError>;
}
