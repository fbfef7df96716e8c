use actix_web::{http::StatusCode, web, web::ServiceConfig};
use pet_portrait_engine::{db_types::OrderStatusType, events::EventProducers, OrderFlowApi};

use super::{
    helpers::{stored_order, webhook_request, TEST_WEBHOOK_SECRET},
    mocks::MockStorefrontDb,
};
use crate::{helpers::calculate_hmac, webhook_routes::GelatoWebhookRoute};

const SHIPPED_PAYLOAD: &str = r#"{
    "topic": "order.status.changed",
    "data": {
        "orderId": "gelato-11aa22bb",
        "orderReferenceId": "PP-TEST000001",
        "fulfillmentStatus": "shipped",
        "trackingCode": "1Z999AA10123456784",
        "carrier": "UPS"
    }
}"#;

fn sign(payload: &str) -> String {
    calculate_hmac(TEST_WEBHOOK_SECRET, payload.as_bytes())
}

#[actix_web::test]
async fn signed_status_update_is_applied() {
    let _ = env_logger::try_init().ok();
    let signature = sign(SHIPPED_PAYLOAD);
    let (status, body) =
        webhook_request(Some(&signature), SHIPPED_PAYLOAD, true, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""success":true"#), "was: {body}");
    assert!(body.contains("PP-TEST000001"), "was: {body}");
}

#[actix_web::test]
async fn missing_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let err = webhook_request(None, SHIPPED_PAYLOAD, true, configure).await.expect_err("Expected rejection");
    assert_eq!(err, "No HMAC signature found.");
}

#[actix_web::test]
async fn forged_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let signature = calculate_hmac("not-the-secret", SHIPPED_PAYLOAD.as_bytes());
    let err =
        webhook_request(Some(&signature), SHIPPED_PAYLOAD, true, configure).await.expect_err("Expected rejection");
    assert_eq!(err, "Invalid HMAC signature.");
}

#[actix_web::test]
async fn signature_checks_can_be_disabled() {
    let _ = env_logger::try_init().ok();
    let (status, body) = webhook_request(None, SHIPPED_PAYLOAD, false, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""success":true"#), "was: {body}");
}

#[actix_web::test]
async fn unexpected_topics_are_acknowledged_and_ignored() {
    let _ = env_logger::try_init().ok();
    let payload = r#"{
        "topic": "catalog.product.updated",
        "data": { "orderReferenceId": "PP-TEST000001", "fulfillmentStatus": "printed" }
    }"#;
    let signature = sign(payload);
    let (status, body) = webhook_request(Some(&signature), payload, true, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ignoring topic"), "was: {body}");
}

#[actix_web::test]
async fn unknown_order_reference_is_acknowledged_with_a_failure_body() {
    let _ = env_logger::try_init().ok();
    let signature = sign(SHIPPED_PAYLOAD);
    let (status, body) =
        webhook_request(Some(&signature), SHIPPED_PAYLOAD, true, configure_unknown_order).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""success":false"#), "was: {body}");
    assert!(body.contains("not known to this store"), "was: {body}");
}

fn configure(cfg: &mut ServiceConfig) {
    let mut db = MockStorefrontDb::new();
    db.expect_fetch_order_by_order_id()
        .returning(|id| Ok(Some(stored_order(id.as_str(), OrderStatusType::Processing))));
    db.expect_apply_fulfillment_update().returning(|update, new_status| {
        assert_eq!(new_status, OrderStatusType::Shipped);
        let mut order = stored_order(update.order_reference.as_str(), new_status);
        order.tracking_number = update.tracking_number.clone();
        order.carrier = update.carrier.clone();
        Ok(order)
    });
    register(cfg, db);
}

fn configure_unknown_order(cfg: &mut ServiceConfig) {
    let mut db = MockStorefrontDb::new();
    db.expect_fetch_order_by_order_id().returning(|_| Ok(None));
    register(cfg, db);
}

fn register(cfg: &mut ServiceConfig, db: MockStorefrontDb) {
    let order_flow_api = OrderFlowApi::new(db, EventProducers::default());
    cfg.service(GelatoWebhookRoute::<MockStorefrontDb>::new()).app_data(web::Data::new(order_flow_api));
}
