use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::{TimeZone, Utc};
use log::debug;
use pet_portrait_engine::db_types::{Customer, Order, OrderId, OrderStatusType};
use ppg_common::{Secret, UsdAmount};
use serde::Serialize;
use sqlx::types::Json;

use crate::middleware::{AdminAuthMiddlewareFactory, HmacMiddlewareFactory};

// Test credentials. DO NOT re-use these anywhere.
pub const TEST_ADMIN_TOKEN: &str = "it-is-a-secret-to-everybody";
pub const TEST_WEBHOOK_SECRET: &str = "gelato-whsec-0000";
pub const TEST_SIGNATURE_HEADER: &str = "x-gelato-signature";

pub async fn get_request(path: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::get().uri(path).to_request();
    let app = test::init_service(App::new().configure(configure)).await;
    debug!("Making GET request to {path}");
    let (_, res) = test::call_service(&app, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub async fn post_request<T: Serialize>(path: &str, body: &T, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::post().uri(path).set_json(body).to_request();
    let app = test::init_service(App::new().configure(configure)).await;
    debug!("Making POST request to {path}");
    let (_, res) = test::call_service(&app, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

/// POSTs to a service guarded by the admin bearer-token middleware. A middleware rejection surfaces as `Err` with
/// the rejection message; responses that made it past the guard come back as `Ok((status, body))`.
pub async fn admin_post_request<T: Serialize>(
    token: Option<&str>,
    path: &str,
    body: &T,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    let mut req = TestRequest::post().uri(path).set_json(body);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    let app = test::init_service(
        App::new()
            .wrap(AdminAuthMiddlewareFactory::new(Secret::new(TEST_ADMIN_TOKEN.to_string())))
            .configure(configure),
    )
    .await;
    let (_, res) = test::try_call_service(&app, req.to_request()).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}

/// POSTs a raw JSON payload to a service wrapped in the webhook HMAC middleware.
pub async fn webhook_request(
    signature: Option<&str>,
    payload: &str,
    check_signature: bool,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    let mut req = TestRequest::post()
        .uri("/gelato")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(payload.to_string());
    if let Some(signature) = signature {
        req = req.insert_header((TEST_SIGNATURE_HEADER, signature));
    }
    let app = test::init_service(
        App::new()
            .wrap(HmacMiddlewareFactory::new(
                TEST_SIGNATURE_HEADER,
                Secret::new(TEST_WEBHOOK_SECRET.to_string()),
                check_signature,
            ))
            .configure(configure),
    )
    .await;
    let (_, res) = test::try_call_service(&app, req.to_request()).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}

/// A persisted order as the mocks hand it back.
pub fn stored_order(order_id: &str, status: OrderStatusType) -> Order {
    Order {
        id: 1,
        order_id: OrderId(order_id.to_string()),
        customer_id: 1,
        product_type: "canvas".to_string(),
        size: "12x16".to_string(),
        total_price: UsdAmount::from_dollars(129),
        photo_urls: Json(vec!["https://cdn.example.com/uploads/rex.jpg".to_string()]),
        storage_folder: None,
        notes: None,
        status,
        paypal_order_id: Some("5O190127TN364715T".to_string()),
        vendor_order_id: None,
        tracking_number: None,
        carrier: None,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap(),
    }
}

pub fn stored_customer() -> Customer {
    Customer {
        id: 1,
        email: "penny@example.com".to_string(),
        first_name: "Penny".to_string(),
        last_name: "Whistler".to_string(),
        address_line1: "14 Biscuit Lane".to_string(),
        address_line2: None,
        city: "Portland".to_string(),
        state: Some("OR".to_string()),
        postal_code: "97205".to_string(),
        country: "US".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap(),
    }
}
