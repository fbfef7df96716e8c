//! `SqliteDatabase` is a concrete implementation of the storefront backend.
//!
//! Unsurprisingly, it uses SQLite, and implements all the traits defined in the [`crate::traits`] module.
use std::fmt::Debug;

use log::*;
use serde_json::json;
use sqlx::SqlitePool;

use super::db::{customers, db_url, events, marketing, new_pool, orders, posts, products};
use crate::{
    db_types::{
        Customer,
        DiscountCode,
        MarketingCampaign,
        NewCampaign,
        NewCustomer,
        NewDiscountCode,
        NewOrder,
        NewPost,
        NewProduct,
        Order,
        OrderEvent,
        OrderEventType,
        OrderId,
        OrderStatusType,
        Post,
        Product,
    },
    order_objects::{FulfillmentUpdate, OrderQueryFilter},
    traits::{BlogManagement, CatalogManagement, MarketingManagement, StorefrontApiError, StorefrontDatabase},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database using the `PPG_DATABASE_URL` environment variable, or the default.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl StorefrontDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Persists a checkout in one transaction: the customer is upserted by email, the order is inserted with `Paid`
    /// status (idempotent on the public order id), and a `payment_succeeded` audit event is appended. Either
    /// everything lands, or nothing does.
    async fn insert_checkout(
        &self,
        customer: NewCustomer,
        order: NewOrder,
    ) -> Result<(Customer, Order, bool), StorefrontApiError> {
        let mut tx = self.pool.begin().await?;
        let customer = customers::upsert_customer(customer, &mut tx).await?;
        let (order, inserted) = orders::idempotent_insert(order, customer.id, &mut tx).await?;
        if inserted {
            let metadata = json!({
                "total_price": order.total_price,
                "paypal_order_id": order.paypal_order_id,
            });
            events::insert_event(order.id, OrderEventType::PaymentSucceeded, metadata, &mut tx).await?;
        }
        tx.commit().await?;
        debug!("📝 Checkout for order [{}] committed (inserted: {inserted})", order.order_id);
        Ok((customer, order, inserted))
    }

    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_order_id(order_id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_customer(&self, customer_id: i64) -> Result<Option<Customer>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let customer = customers::fetch_customer_by_id(customer_id, &mut conn).await?;
        Ok(customer)
    }

    async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::search_orders(query, &mut conn).await?;
        Ok(orders)
    }

    async fn update_order_status(
        &self,
        order_id: &OrderId,
        status: OrderStatusType,
        reason: &str,
    ) -> Result<Order, StorefrontApiError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::update_status(order_id, status, &mut tx)
            .await?
            .ok_or_else(|| StorefrontApiError::OrderNotFound(order_id.clone()))?;
        let metadata = json!({ "status": status, "reason": reason });
        events::insert_event(order.id, OrderEventType::StatusChanged, metadata, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn record_fulfillment_created(
        &self,
        order_id: &OrderId,
        vendor_order_id: &str,
    ) -> Result<Order, StorefrontApiError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::set_vendor_order_id(order_id, vendor_order_id, &mut tx)
            .await?
            .ok_or_else(|| StorefrontApiError::OrderNotFound(order_id.clone()))?;
        let metadata = json!({ "vendor_order_id": vendor_order_id });
        events::insert_event(order.id, OrderEventType::GelatoOrderCreated, metadata, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn record_fulfillment_failure(&self, order_id: &OrderId, error: &str) -> Result<(), StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_order_id(order_id, &mut conn)
            .await?
            .ok_or_else(|| StorefrontApiError::OrderNotFound(order_id.clone()))?;
        let metadata = json!({ "error": error });
        events::insert_event(order.id, OrderEventType::GelatoSubmissionFailed, metadata, &mut conn).await?;
        Ok(())
    }

    async fn apply_fulfillment_update(
        &self,
        update: &FulfillmentUpdate,
        new_status: OrderStatusType,
    ) -> Result<Order, StorefrontApiError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::apply_fulfillment_update(update, new_status, &mut tx)
            .await?
            .ok_or_else(|| StorefrontApiError::OrderNotFound(update.order_reference.clone()))?;
        let metadata = json!({
            "status": new_status,
            "vendor_status": update.vendor_status,
            "tracking_number": update.tracking_number,
            "carrier": update.carrier,
        });
        events::insert_event(order.id, OrderEventType::StatusChanged, metadata, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn insert_order_event(
        &self,
        order_pk: i64,
        event_type: OrderEventType,
        metadata: serde_json::Value,
    ) -> Result<(), StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        events::insert_event(order_pk, event_type, metadata, &mut conn).await?;
        Ok(())
    }

    async fn fetch_order_events(&self, order_id: &OrderId) -> Result<Vec<OrderEvent>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let events = events::fetch_events_for_order(order_id, &mut conn).await?;
        Ok(events)
    }

    async fn delete_order(&self, order_id: &OrderId) -> Result<Order, StorefrontApiError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::fetch_order_by_order_id(order_id, &mut tx)
            .await?
            .ok_or_else(|| StorefrontApiError::OrderNotFound(order_id.clone()))?;
        events::delete_events_for_order(order.id, &mut tx).await?;
        orders::delete_order(order.id, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }
}

impl MarketingManagement for SqliteDatabase {
    async fn fetch_active_campaign(&self) -> Result<Option<MarketingCampaign>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let campaign = marketing::fetch_active_campaign(&mut conn).await?;
        Ok(campaign)
    }

    async fn fetch_campaign_by_code(&self, code: &str) -> Result<Option<MarketingCampaign>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let campaign = marketing::fetch_campaign_by_code(code, &mut conn).await?;
        Ok(campaign)
    }

    async fn fetch_discount_code(&self, code: &str) -> Result<Option<DiscountCode>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let discount = marketing::fetch_discount_code(code, &mut conn).await?;
        Ok(discount)
    }

    async fn increment_code_usage(&self, code_id: i64) -> Result<(), StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        marketing::increment_code_usage(code_id, &mut conn).await?;
        Ok(())
    }

    async fn upsert_campaign(&self, campaign: NewCampaign) -> Result<MarketingCampaign, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let campaign = marketing::upsert_campaign(campaign, &mut conn).await?;
        Ok(campaign)
    }

    async fn upsert_discount_code(&self, code: NewDiscountCode) -> Result<DiscountCode, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let discount = marketing::upsert_discount_code(code, &mut conn).await?;
        Ok(discount)
    }

    async fn subscribe_email(&self, email: &str) -> Result<bool, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let fresh = marketing::subscribe_email(email, &mut conn).await?;
        Ok(fresh)
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_product_overrides(&self) -> Result<Vec<Product>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let products = products::fetch_products(&mut conn).await?;
        Ok(products)
    }

    async fn upsert_product(&self, product: NewProduct) -> Result<Product, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::upsert_product(product, &mut conn).await?;
        Ok(product)
    }
}

impl BlogManagement for SqliteDatabase {
    async fn fetch_posts(&self, include_unpublished: bool) -> Result<Vec<Post>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let posts = posts::fetch_posts(include_unpublished, &mut conn).await?;
        Ok(posts)
    }

    async fn fetch_post(&self, post_id: i64) -> Result<Option<Post>, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let post = posts::fetch_post(post_id, &mut conn).await?;
        Ok(post)
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let post = posts::insert_post(post, &mut conn).await?;
        Ok(post)
    }

    async fn update_post(&self, post_id: i64, post: NewPost) -> Result<Post, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let post = posts::update_post(post_id, post, &mut conn).await?.ok_or(StorefrontApiError::ModificationNoOp)?;
        Ok(post)
    }

    async fn delete_post(&self, post_id: i64) -> Result<bool, StorefrontApiError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = posts::delete_post(post_id, &mut conn).await?;
        Ok(deleted)
    }
}
