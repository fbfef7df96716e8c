use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{Days, TimeZone, Utc};
use pet_portrait_engine::{
    db_types::{DiscountCode, MarketingCampaign},
    MarketingApi,
};
use serde_json::json;

use super::{
    helpers::{get_request, post_request},
    mocks::MockMarketingDb,
};
use crate::routes::{ActiveCampaignRoute, SubscribeNewsletterRoute, VerifyDiscountRoute};

fn summer_campaign() -> MarketingCampaign {
    MarketingCampaign {
        id: 1,
        name: "Summer sale".to_string(),
        code: "summer15".to_string(),
        percent: 15,
        description: Some("15% off everything".to_string()),
        active: true,
        usage_count: 7,
        starts_at: None,
        ends_at: Some(Utc::now() + Days::new(7)),
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
    }
}

#[actix_web::test]
async fn live_campaign_code_verifies() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "code": " SUMMER15 " });
    let (status, body) = post_request("/discounts/verify", &body, configure_live_campaign).await;
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""valid":true"#), "was: {body}");
    assert!(body.contains(r#""percent":15"#), "was: {body}");
    assert!(body.contains(r#""discount_type":"campaign""#), "was: {body}");
}

#[actix_web::test]
async fn standalone_code_verifies_when_no_campaign_matches() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "code": "welcome10" });
    let (status, body) = post_request("/discounts/verify", &body, configure_standalone_code).await;
    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert!(body.contains(r#""discount_type":"code""#), "was: {body}");
    assert!(body.contains(r#""percent":10"#), "was: {body}");
}

#[actix_web::test]
async fn unknown_code_is_a_404() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "code": "bogus" });
    let (status, body) = post_request("/discounts/verify", &body, configure_nothing_matches).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No active discount matches"), "was: {body}");
}

#[actix_web::test]
async fn active_campaign_is_null_when_nothing_runs() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/marketing/campaign", configure_nothing_matches).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "null");
}

#[actix_web::test]
async fn active_campaign_is_returned() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/marketing/campaign", configure_live_campaign).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""code":"summer15""#), "was: {body}");
}

#[actix_web::test]
async fn newsletter_subscription_reports_freshness() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "email": "penny@example.com" });
    let (status, body) = post_request("/newsletter/subscribe", &body, configure_live_campaign).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Subscribed."), "was: {body}");
}

fn configure_live_campaign(cfg: &mut ServiceConfig) {
    let mut db = MockMarketingDb::new();
    db.expect_fetch_campaign_by_code().returning(|_| Ok(Some(summer_campaign())));
    db.expect_fetch_active_campaign().returning(|| Ok(Some(summer_campaign())));
    db.expect_subscribe_email().returning(|_| Ok(true));
    register(cfg, db);
}

fn configure_standalone_code(cfg: &mut ServiceConfig) {
    let mut db = MockMarketingDb::new();
    db.expect_fetch_campaign_by_code().returning(|_| Ok(None));
    db.expect_fetch_discount_code().returning(|_| {
        Ok(Some(DiscountCode {
            id: 3,
            code: "welcome10".to_string(),
            percent: 10,
            description: None,
            active: true,
            usage_count: 0,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }))
    });
    db.expect_increment_code_usage().returning(|_| Ok(()));
    register(cfg, db);
}

fn configure_nothing_matches(cfg: &mut ServiceConfig) {
    let mut db = MockMarketingDb::new();
    db.expect_fetch_campaign_by_code().returning(|_| Ok(None));
    db.expect_fetch_discount_code().returning(|_| Ok(None));
    db.expect_fetch_active_campaign().returning(|| Ok(None));
    register(cfg, db);
}

fn register(cfg: &mut ServiceConfig, db: MockMarketingDb) {
    let marketing_api = MarketingApi::new(db);
    cfg.service(VerifyDiscountRoute::<MockMarketingDb>::new())
        .service(ActiveCampaignRoute::<MockMarketingDb>::new())
        .service(SubscribeNewsletterRoute::<MockMarketingDb>::new())
        .app_data(web::Data::new(marketing_api));
}
