use actix_web::{http::StatusCode, web, web::ServiceConfig};
use pet_portrait_engine::{db_types::OrderStatusType, events::EventProducers, OrderFlowApi};
use serde_json::json;

use super::{
    helpers::{post_request, stored_customer, stored_order},
    mocks::MockStorefrontDb,
};
use crate::{config::PayPalConfig, integrations::paypal::PayPalApi, routes::CreateOrderRoute};

fn checkout_body(product_type: &str, size: &str, price: i64) -> serde_json::Value {
    json!({
        "email": "penny@example.com",
        "first_name": "Penny",
        "last_name": "Whistler",
        "address_line1": "14 Biscuit Lane",
        "city": "Portland",
        "state": "OR",
        "postal_code": "97205",
        "country": "US",
        "order_id": "PP-TEST000001",
        "product_type": product_type,
        "size": size,
        "price": price,
        "photo_urls": ["https://cdn.example.com/uploads/rex.jpg"],
        "paypal_order_id": "5O190127TN364715T",
    })
}

#[actix_web::test]
async fn checkout_happy_path() {
    let _ = env_logger::try_init().ok();
    let body = checkout_body("canvas", "12x16", 129);
    let (status, body) = post_request("/orders/create", &body, configure).await;
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""order_id":"PP-TEST000001""#), "was: {body}");
    assert!(body.contains(r#""status":"Paid""#), "was: {body}");
    assert!(body.contains(r#""total_price":129"#), "was: {body}");
}

#[actix_web::test]
async fn underpayment_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let body = checkout_body("canvas", "12x16", 90);
    let (status, body) = post_request("/orders/create", &body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("less than the calculated price"), "was: {body}");
}

#[actix_web::test]
async fn unknown_product_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let body = checkout_body("hologram", "12x16", 500);
    let (status, body) = post_request("/orders/create", &body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid product selection"), "was: {body}");
}

#[actix_web::test]
async fn unknown_size_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let body = checkout_body("canvas", "9x9", 129);
    let (status, body) = post_request("/orders/create", &body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid product selection"), "was: {body}");
}

#[actix_web::test]
async fn checkout_replay_returns_the_stored_order() {
    let _ = env_logger::try_init().ok();
    let body = checkout_body("canvas", "12x16", 129);
    let (status, body) = post_request("/orders/create", &body, configure_replay).await;
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""order_id":"PP-TEST000001""#), "was: {body}");
}

fn configure(cfg: &mut ServiceConfig) {
    let mut db = MockStorefrontDb::new();
    db.expect_insert_checkout()
        .returning(|_, _| Ok((stored_customer(), stored_order("PP-TEST000001", OrderStatusType::Paid), true)));
    let order_flow_api = OrderFlowApi::new(db, EventProducers::default());
    let paypal_api = PayPalApi::new(PayPalConfig::default());
    cfg.service(CreateOrderRoute::<MockStorefrontDb>::new())
        .app_data(web::Data::new(order_flow_api))
        .app_data(web::Data::new(paypal_api));
}

fn configure_replay(cfg: &mut ServiceConfig) {
    let mut db = MockStorefrontDb::new();
    db.expect_insert_checkout()
        .returning(|_, _| Ok((stored_customer(), stored_order("PP-TEST000001", OrderStatusType::Paid), false)));
    let order_flow_api = OrderFlowApi::new(db, EventProducers::default());
    let paypal_api = PayPalApi::new(PayPalConfig::default());
    cfg.service(CreateOrderRoute::<MockStorefrontDb>::new())
        .app_data(web::Data::new(order_flow_api))
        .app_data(web::Data::new(paypal_api));
}
