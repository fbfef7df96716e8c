use sqlx::{types::Json, SqliteConnection};

use crate::db_types::{OrderEvent, OrderEventType, OrderId};

/// Appends an audit event for the given order (by primary key, not the public order id).
pub async fn insert_event(
    order_pk: i64,
    event_type: OrderEventType,
    metadata: serde_json::Value,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO order_events (order_id, event_type, metadata) VALUES ($1, $2, $3)")
        .bind(order_pk)
        .bind(event_type.to_string())
        .bind(Json(metadata))
        .execute(conn)
        .await?;
    Ok(())
}

/// The audit trail for an order, oldest first.
pub async fn fetch_events_for_order(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderEvent>, sqlx::Error> {
    let events = sqlx::query_as(
        r#"
            SELECT order_events.* FROM order_events
            JOIN orders ON orders.id = order_events.order_id
            WHERE orders.order_id = $1
            ORDER BY order_events.created_at ASC, order_events.id ASC;
        "#,
    )
    .bind(order_id.as_str())
    .fetch_all(conn)
    .await?;
    Ok(events)
}

pub async fn delete_events_for_order(order_pk: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM order_events WHERE order_id = $1").bind(order_pk).execute(conn).await?;
    Ok(())
}
