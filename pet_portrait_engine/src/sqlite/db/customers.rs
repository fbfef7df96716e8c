use sqlx::SqliteConnection;

use crate::db_types::{Customer, NewCustomer};

/// Inserts the customer, or updates the existing row with the same email. Name and address fields are overwritten
/// with whatever was submitted at checkout, since that is the freshest shipping information we have.
pub async fn upsert_customer(customer: NewCustomer, conn: &mut SqliteConnection) -> Result<Customer, sqlx::Error> {
    let customer = sqlx::query_as(
        r#"
            INSERT INTO customers (
                email,
                first_name,
                last_name,
                address_line1,
                address_line2,
                city,
                state,
                postal_code,
                country
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (email) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                address_line1 = excluded.address_line1,
                address_line2 = excluded.address_line2,
                city = excluded.city,
                state = excluded.state,
                postal_code = excluded.postal_code,
                country = excluded.country,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *;
        "#,
    )
    .bind(customer.email.trim().to_lowercase())
    .bind(customer.first_name)
    .bind(customer.last_name)
    .bind(customer.address_line1)
    .bind(customer.address_line2)
    .bind(customer.city)
    .bind(customer.state)
    .bind(customer.postal_code)
    .bind(customer.country)
    .fetch_one(conn)
    .await?;
    Ok(customer)
}

pub async fn fetch_customer_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Customer>, sqlx::Error> {
    let customer = sqlx::query_as("SELECT * FROM customers WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(customer)
}

pub async fn fetch_customer_by_email(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Customer>, sqlx::Error> {
    let customer =
        sqlx::query_as("SELECT * FROM customers WHERE email = $1").bind(email).fetch_optional(conn).await?;
    Ok(customer)
}
