use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use pet_portrait_engine::{
    db_types::{DiscountCode, OrderStatusType, Product},
    events::EventProducers,
    CatalogApi,
    MarketingApi,
    OrderFlowApi,
};
use serde_json::json;

use super::{
    helpers::{admin_post_request, stored_order, TEST_ADMIN_TOKEN},
    mocks::{MockCatalogDb, MockMarketingDb, MockStorefrontDb},
};
use crate::routes::{
    AdminSearchOrdersRoute,
    AdminUpdateStatusRoute,
    AdminUpsertDiscountCodeRoute,
    AdminUpsertProductRoute,
};

#[actix_web::test]
async fn missing_token_is_rejected() {
    let _ = env_logger::try_init().ok();
    let err = admin_post_request(None, "/orders", &json!({}), configure).await.expect_err("Expected rejection");
    assert_eq!(err, "Missing bearer token.");
}

#[actix_web::test]
async fn wrong_token_is_rejected() {
    let _ = env_logger::try_init().ok();
    let err = admin_post_request(Some("wild-guess"), "/orders", &json!({}), configure)
        .await
        .expect_err("Expected rejection");
    assert_eq!(err, "Invalid bearer token.");
}

#[actix_web::test]
async fn search_returns_orders_and_totals() {
    let _ = env_logger::try_init().ok();
    let (status, body) = admin_post_request(Some(TEST_ADMIN_TOKEN), "/orders", &json!({}), configure)
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""total_orders":25800"#), "was: {body}");
    assert!(body.contains("PP-TEST000001"), "was: {body}");
    assert!(body.contains("PP-TEST000002"), "was: {body}");
}

#[actix_web::test]
async fn status_update_writes_through() {
    let _ = env_logger::try_init().ok();
    let params = json!({ "order_id": "PP-TEST000001", "status": "Shipped", "reason": "Shipped by hand" });
    let (status, body) = admin_post_request(Some(TEST_ADMIN_TOKEN), "/orders/update-status", &params, configure)
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""status":"Shipped""#), "was: {body}");
}

#[actix_web::test]
async fn status_update_for_unknown_order_is_a_404() {
    let _ = env_logger::try_init().ok();
    let params = json!({ "order_id": "PP-GONE", "status": "Cancelled" });
    let (status, body) =
        admin_post_request(Some(TEST_ADMIN_TOKEN), "/orders/update-status", &params, configure_unknown_order)
            .await
            .expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND, "was: {body}");
}

#[actix_web::test]
async fn product_override_is_saved() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "product_type": "canvas", "name": "Gallery canvas", "base_price": 13900, "plan": "classic" });
    let (status, body) = admin_post_request(Some(TEST_ADMIN_TOKEN), "/products", &body, configure_catalog)
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains("Gallery canvas"), "was: {body}");
}

#[actix_web::test]
async fn discount_code_is_saved_normalized() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "code": " Welcome10 ", "percent": 10, "description": "First order" });
    let (status, body) = admin_post_request(Some(TEST_ADMIN_TOKEN), "/discount-codes", &body, configure_marketing)
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""code":"welcome10""#), "was: {body}");
    assert!(body.contains(r#""percent":10"#), "was: {body}");
}

fn configure(cfg: &mut ServiceConfig) {
    let mut db = MockStorefrontDb::new();
    db.expect_search_orders().returning(|_| {
        Ok(vec![
            stored_order("PP-TEST000001", OrderStatusType::Paid),
            stored_order("PP-TEST000002", OrderStatusType::Shipped),
        ])
    });
    db.expect_fetch_order_by_order_id()
        .returning(|id| Ok(Some(stored_order(id.as_str(), OrderStatusType::Processing))));
    db.expect_update_order_status()
        .returning(|id, status, _| Ok(stored_order(id.as_str(), status)));
    register(cfg, db);
}

fn configure_unknown_order(cfg: &mut ServiceConfig) {
    let mut db = MockStorefrontDb::new();
    db.expect_fetch_order_by_order_id().returning(|_| Ok(None));
    register(cfg, db);
}

fn configure_catalog(cfg: &mut ServiceConfig) {
    let mut db = MockCatalogDb::new();
    db.expect_upsert_product().returning(|product| {
        Ok(Product {
            id: 1,
            product_type: product.product_type,
            name: product.name,
            base_price: product.base_price,
            plan: product.plan,
            image_url: product.image_url,
            active: product.active,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        })
    });
    let catalog_api = CatalogApi::new(db);
    cfg.service(AdminUpsertProductRoute::<MockCatalogDb>::new()).app_data(web::Data::new(catalog_api));
}

fn configure_marketing(cfg: &mut ServiceConfig) {
    let mut db = MockMarketingDb::new();
    db.expect_upsert_discount_code().returning(|code| {
        assert_eq!(code.code, "welcome10");
        Ok(DiscountCode {
            id: 1,
            code: code.code,
            percent: code.percent,
            description: code.description,
            active: code.active,
            usage_count: 0,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        })
    });
    let marketing_api = MarketingApi::new(db);
    cfg.service(AdminUpsertDiscountCodeRoute::<MockMarketingDb>::new()).app_data(web::Data::new(marketing_api));
}

fn register(cfg: &mut ServiceConfig, db: MockStorefrontDb) {
    let order_flow_api = OrderFlowApi::new(db, EventProducers::default());
    cfg.service(AdminSearchOrdersRoute::<MockStorefrontDb>::new())
        .service(AdminUpdateStatusRoute::<MockStorefrontDb>::new())
        .app_data(web::Data::new(order_flow_api));
}
