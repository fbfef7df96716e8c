use log::debug;
use sqlx::{types::Json, QueryBuilder, SqliteConnection};

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStatusType},
    order_objects::{FulfillmentUpdate, OrderQueryFilter},
};

/// Inserts the order into the database, returning `false` in the second parameter if the order already exists.
pub async fn idempotent_insert(
    order: NewOrder,
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<(Order, bool), sqlx::Error> {
    let inserted = match fetch_order_by_order_id(&order.order_id, conn).await? {
        Some(order) => (order, false),
        None => {
            let order = insert_order(order, customer_id, conn).await?;
            debug!("📝 Order [{}] inserted with id {}", order.order_id, order.id);
            (order, true)
        },
    };
    Ok(inserted)
}

/// Inserts a new order using the given connection. This is not atomic. You can embed this call inside a
/// transaction if you need to ensure atomicity, and pass `&mut *tx` as the connection argument.
async fn insert_order(order: NewOrder, customer_id: i64, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                order_id,
                customer_id,
                product_type,
                size,
                total_price,
                photo_urls,
                storage_folder,
                notes,
                paypal_order_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *;
        "#,
    )
    .bind(order.order_id)
    .bind(customer_id)
    .bind(order.product_type)
    .bind(order.size)
    .bind(order.total_price)
    .bind(Json(order.photo_urls))
    .bind(order.storage_folder)
    .bind(order.notes)
    .bind(order.paypal_order_id)
    .fetch_one(conn)
    .await?;
    Ok(order)
}

pub async fn fetch_order_by_order_id(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order =
        sqlx::query_as("SELECT * FROM orders WHERE order_id = $1").bind(order_id.as_str()).fetch_optional(conn).await?;
    Ok(order)
}

/// Fetches orders according to criteria specified in the `OrderQueryFilter`
///
/// Resulting orders are ordered by `created_at` in ascending order
pub async fn search_orders(query: OrderQueryFilter, conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let mut builder = QueryBuilder::new(
        r#"
    SELECT * FROM orders
    "#,
    );
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(order_id) = query.order_id {
        where_clause.push("order_id = ");
        where_clause.push_bind_unseparated(order_id.to_string());
    }
    if let Some(email) = query.customer_email {
        where_clause.push("customer_id IN (SELECT id FROM customers WHERE email = ");
        where_clause.push_bind_unseparated(email.trim().to_lowercase());
        where_clause.push_unseparated(")");
    }
    if let Some(product_type) = query.product_type {
        where_clause.push("product_type = ");
        where_clause.push_bind_unseparated(product_type);
    }
    if query.status.as_ref().map(|s| !s.is_empty()).unwrap_or(false) {
        let mut statuses = vec![];
        query.status.as_ref().into_iter().flat_map(|s| s.iter()).for_each(|s| {
            statuses.push(format!("'{s}'"));
        });
        let status_clause = statuses.join(",");
        where_clause.push(format!("status IN ({status_clause})"));
    }
    if let Some(since) = query.since {
        where_clause.push("created_at >= ");
        where_clause.push_bind_unseparated(since);
    }
    if let Some(until) = query.until {
        where_clause.push("created_at <= ");
        where_clause.push_bind_unseparated(until);
    }
    builder.push(" ORDER BY created_at ASC");
    let query = builder.build_query_as::<Order>();
    let orders = query.fetch_all(conn).await?;
    Ok(orders)
}

/// Sets the order status, returning the updated row, or `None` if the order id is unknown.
pub async fn update_status(
    order_id: &OrderId,
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as(
        "UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE order_id = $2 RETURNING *",
    )
    .bind(status.to_string())
    .bind(order_id.as_str())
    .fetch_optional(conn)
    .await?;
    Ok(order)
}

/// Stores the print vendor's order id and moves the order to `Processing`.
pub async fn set_vendor_order_id(
    order_id: &OrderId,
    vendor_order_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
            UPDATE orders
            SET vendor_order_id = $1, status = $2, updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $3
            RETURNING *;
        "#,
    )
    .bind(vendor_order_id)
    .bind(OrderStatusType::Processing.to_string())
    .bind(order_id.as_str())
    .fetch_optional(conn)
    .await?;
    Ok(order)
}

/// Applies a vendor webhook update. Tracking details are only overwritten when the webhook carries them, so a
/// later update without a tracking number does not wipe an earlier one.
pub async fn apply_fulfillment_update(
    update: &FulfillmentUpdate,
    new_status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
            UPDATE orders
            SET status = $1,
                tracking_number = COALESCE($2, tracking_number),
                carrier = COALESCE($3, carrier),
                updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $4
            RETURNING *;
        "#,
    )
    .bind(new_status.to_string())
    .bind(update.tracking_number.as_deref())
    .bind(update.carrier.as_deref())
    .bind(update.order_reference.as_str())
    .fetch_optional(conn)
    .await?;
    Ok(order)
}

/// Hard-deletes the order row. Audit events must be removed first; see the trait implementation.
pub async fn delete_order(order_pk: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM orders WHERE id = $1").bind(order_pk).execute(conn).await?;
    Ok(())
}
