use log::*;

use crate::{
    db_types::{NewProduct, Product},
    pricing::{static_catalog, CatalogEntry, SIZE_TABLE},
    traits::{CatalogManagement, StorefrontApiError},
};

/// The built-in product catalog merged with any admin overrides from the database.
pub struct CatalogApi<B> {
    db: B,
}

impl<B: Clone> Clone for CatalogApi<B> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone() }
    }
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    /// The effective catalog. Database rows replace built-in entries with the same product
    /// type, and new types are appended. Inactive entries are filtered out.
    pub async fn catalog(&self) -> Result<Vec<CatalogEntry>, StorefrontApiError> {
        let mut entries = self.full_catalog().await?;
        entries.retain(|e| e.active);
        Ok(entries)
    }

    /// The merged catalog including deactivated entries, for the admin back-office.
    pub async fn full_catalog(&self) -> Result<Vec<CatalogEntry>, StorefrontApiError> {
        let mut entries = static_catalog();
        let overrides = self.db.fetch_product_overrides().await?;
        for row in overrides {
            let entry = CatalogEntry {
                product_type: row.product_type,
                name: row.name,
                base_price: row.base_price,
                plan: row.plan,
                image_url: row.image_url,
                active: row.active,
            };
            match entries.iter_mut().find(|e| e.product_type == entry.product_type) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }
        Ok(entries)
    }

    /// The sizes every product is offered in, with their price modifiers.
    pub fn sizes(&self) -> Vec<(String, f64)> {
        SIZE_TABLE.iter().map(|(size, modifier)| (size.to_string(), *modifier)).collect()
    }

    pub async fn upsert_product(&self, product: NewProduct) -> Result<Product, StorefrontApiError> {
        let product = self.db.upsert_product(product).await?;
        info!("🏷️ Product override saved for [{}] at {}", product.product_type, product.base_price);
        Ok(product)
    }
}
