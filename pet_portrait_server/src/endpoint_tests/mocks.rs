use mockall::mock;
use pet_portrait_engine::{
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

mock! {
    pub StorefrontDb {}
    impl Clone for StorefrontDb {
        fn clone(&self) -> Self;
    }
    impl StorefrontDatabase for StorefrontDb {
        fn url(&self) -> &str;
        async fn insert_checkout(&self, customer: NewCustomer, order: NewOrder) -> Result<(Customer, Order, bool), StorefrontApiError>;
        async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, StorefrontApiError>;
        async fn fetch_customer(&self, customer_id: i64) -> Result<Option<Customer>, StorefrontApiError>;
        async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, StorefrontApiError>;
        async fn update_order_status(&self, order_id: &OrderId, status: OrderStatusType, reason: &str) -> Result<Order, StorefrontApiError>;
        async fn record_fulfillment_created(&self, order_id: &OrderId, vendor_order_id: &str) -> Result<Order, StorefrontApiError>;
        async fn record_fulfillment_failure(&self, order_id: &OrderId, error: &str) -> Result<(), StorefrontApiError>;
        async fn apply_fulfillment_update(&self, update: &FulfillmentUpdate, new_status: OrderStatusType) -> Result<Order, StorefrontApiError>;
        async fn insert_order_event(&self, order_pk: i64, event_type: OrderEventType, metadata: serde_json::Value) -> Result<(), StorefrontApiError>;
        async fn fetch_order_events(&self, order_id: &OrderId) -> Result<Vec<OrderEvent>, StorefrontApiError>;
        async fn delete_order(&self, order_id: &OrderId) -> Result<Order, StorefrontApiError>;
    }
}

mock! {
    pub MarketingDb {}
    impl Clone for MarketingDb {
        fn clone(&self) -> Self;
    }
    impl MarketingManagement for MarketingDb {
        async fn fetch_active_campaign(&self) -> Result<Option<MarketingCampaign>, StorefrontApiError>;
        async fn fetch_campaign_by_code(&self, code: &str) -> Result<Option<MarketingCampaign>, StorefrontApiError>;
        async fn fetch_discount_code(&self, code: &str) -> Result<Option<DiscountCode>, StorefrontApiError>;
        async fn increment_code_usage(&self, code_id: i64) -> Result<(), StorefrontApiError>;
        async fn upsert_campaign(&self, campaign: NewCampaign) -> Result<MarketingCampaign, StorefrontApiError>;
        async fn upsert_discount_code(&self, code: NewDiscountCode) -> Result<DiscountCode, StorefrontApiError>;
        async fn subscribe_email(&self, email: &str) -> Result<bool, StorefrontApiError>;
    }
}

mock! {
    pub CatalogDb {}
    impl Clone for CatalogDb {
        fn clone(&self) -> Self;
    }
    impl CatalogManagement for CatalogDb {
        async fn fetch_product_overrides(&self) -> Result<Vec<Product>, StorefrontApiError>;
        async fn upsert_product(&self, product: NewProduct) -> Result<Product, StorefrontApiError>;
    }
}

mock! {
    pub BlogDb {}
    impl Clone for BlogDb {
        fn clone(&self) -> Self;
    }
    impl BlogManagement for BlogDb {
        async fn fetch_posts(&self, include_unpublished: bool) -> Result<Vec<Post>, StorefrontApiError>;
        async fn fetch_post(&self, post_id: i64) -> Result<Option<Post>, StorefrontApiError>;
        async fn insert_post(&self, post: NewPost) -> Result<Post, StorefrontApiError>;
        async fn update_post(&self, post_id: i64, post: NewPost) -> Result<Post, StorefrontApiError>;
        async fn delete_post(&self, post_id: i64) -> Result<bool, StorefrontApiError>;
    }
}
