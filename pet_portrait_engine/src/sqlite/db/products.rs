use sqlx::SqliteConnection;

use crate::db_types::{NewProduct, Product};

pub async fn fetch_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    let products = sqlx::query_as("SELECT * FROM products ORDER BY product_type ASC").fetch_all(conn).await?;
    Ok(products)
}

/// Inserts a catalog override, or updates the existing row with the same product type.
pub async fn upsert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, sqlx::Error> {
    let product = sqlx::query_as(
        r#"
            INSERT INTO products (product_type, name, base_price, plan, image_url, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (product_type) DO UPDATE SET
                name = excluded.name,
                base_price = excluded.base_price,
                plan = excluded.plan,
                image_url = excluded.image_url,
                active = excluded.active,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(product.product_type)
    .bind(product.name)
    .bind(product.base_price)
    .bind(product.plan)
    .bind(product.image_url)
    .bind(product.active)
    .fetch_one(conn)
    .await?;
    Ok(product)
}
