use sqlx::SqliteConnection;

use crate::db_types::{DiscountCode, MarketingCampaign, NewCampaign, NewDiscountCode};

/// The newest active campaign. Callers still need to check the date window with
/// [`MarketingCampaign::is_live`].
pub async fn fetch_active_campaign(conn: &mut SqliteConnection) -> Result<Option<MarketingCampaign>, sqlx::Error> {
    let campaign =
        sqlx::query_as("SELECT * FROM marketing_campaigns WHERE active = TRUE ORDER BY created_at DESC, id DESC")
            .fetch_optional(conn)
            .await?;
    Ok(campaign)
}

pub async fn fetch_campaign_by_code(
    code: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<MarketingCampaign>, sqlx::Error> {
    let campaign = sqlx::query_as("SELECT * FROM marketing_campaigns WHERE code = $1 AND active = TRUE")
        .bind(code)
        .fetch_optional(conn)
        .await?;
    Ok(campaign)
}

pub async fn fetch_discount_code(code: &str, conn: &mut SqliteConnection) -> Result<Option<DiscountCode>, sqlx::Error> {
    let discount = sqlx::query_as("SELECT * FROM discount_codes WHERE code = $1 AND active = TRUE")
        .bind(code)
        .fetch_optional(conn)
        .await?;
    Ok(discount)
}

pub async fn increment_code_usage(code_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE discount_codes SET usage_count = usage_count + 1 WHERE id = $1")
        .bind(code_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Create a standalone discount code, or update the existing row with the same code. An update keeps the usage
/// counter.
pub async fn upsert_discount_code(
    code: NewDiscountCode,
    conn: &mut SqliteConnection,
) -> Result<DiscountCode, sqlx::Error> {
    let discount = sqlx::query_as(
        r#"
            INSERT INTO discount_codes (code, percent, description, active)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (code) DO UPDATE SET
                percent = excluded.percent,
                description = excluded.description,
                active = excluded.active
            RETURNING *;
        "#,
    )
    .bind(code.code)
    .bind(code.percent)
    .bind(code.description)
    .bind(code.active)
    .fetch_one(conn)
    .await?;
    Ok(discount)
}

pub async fn upsert_campaign(
    campaign: NewCampaign,
    conn: &mut SqliteConnection,
) -> Result<MarketingCampaign, sqlx::Error> {
    let campaign = sqlx::query_as(
        r#"
            INSERT INTO marketing_campaigns (name, code, percent, description, active, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (code) DO UPDATE SET
                name = excluded.name,
                percent = excluded.percent,
                description = excluded.description,
                active = excluded.active,
                starts_at = excluded.starts_at,
                ends_at = excluded.ends_at
            RETURNING *;
        "#,
    )
    .bind(campaign.name)
    .bind(campaign.code)
    .bind(campaign.percent)
    .bind(campaign.description)
    .bind(campaign.active)
    .bind(campaign.starts_at)
    .bind(campaign.ends_at)
    .fetch_one(conn)
    .await?;
    Ok(campaign)
}

/// Returns `false` if the address was already subscribed.
pub async fn subscribe_email(email: &str, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("INSERT INTO newsletter_subscribers (email) VALUES ($1) ON CONFLICT (email) DO NOTHING")
        .bind(email)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
