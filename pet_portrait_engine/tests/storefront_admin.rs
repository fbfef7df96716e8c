use chrono::{Duration, Utc};
use pet_portrait_engine::{
    db_types::{NewCampaign, NewDiscountCode, NewPost, NewProduct},
    pricing::static_catalog,
    traits::MarketingManagement,
    BlogApi,
    CatalogApi,
    MarketingApi,
};
use ppg_common::UsdAmount;

mod support;
use support::new_test_database;

async fn insert_discount_code<B: MarketingManagement>(api: &MarketingApi<B>, code: &str, percent: i64) {
    let code = NewDiscountCode {
        code: code.to_string(),
        percent,
        description: Some("launch promo".to_string()),
        active: true,
    };
    api.upsert_discount_code(code).await.expect("Error saving discount code");
}

fn summer_campaign() -> NewCampaign {
    NewCampaign {
        name: "Summer Portraits".to_string(),
        code: "summer15".to_string(),
        percent: 15,
        description: Some("15% off everything".to_string()),
        active: true,
        starts_at: None,
        ends_at: None,
    }
}

#[tokio::test]
async fn catalog_overrides_replace_static_entries() {
    let db = new_test_database().await;
    let api = CatalogApi::new(db);
    // with no overrides the built-in table comes back as-is
    assert_eq!(api.catalog().await.unwrap().len(), static_catalog().len());

    let sale_poster = NewProduct {
        product_type: "poster".to_string(),
        name: "Premium Poster Print (sale)".to_string(),
        base_price: UsdAmount::from_dollars(49),
        plan: "classic".to_string(),
        image_url: None,
        active: true,
    };
    api.upsert_product(sale_poster).await.unwrap();
    let catalog = api.catalog().await.unwrap();
    assert_eq!(catalog.len(), static_catalog().len());
    let poster = catalog.iter().find(|e| e.product_type == "poster").unwrap();
    assert_eq!(poster.base_price, UsdAmount::from_dollars(49));
    assert_eq!(poster.name, "Premium Poster Print (sale)");
}

#[tokio::test]
async fn deactivated_product_disappears_from_the_catalog() {
    let db = new_test_database().await;
    let api = CatalogApi::new(db);
    let retired = NewProduct {
        product_type: "metal".to_string(),
        name: "Metal Print Portrait".to_string(),
        base_price: UsdAmount::from_dollars(149),
        plan: "masterpiece".to_string(),
        image_url: None,
        active: false,
    };
    api.upsert_product(retired).await.unwrap();
    let catalog = api.catalog().await.unwrap();
    assert!(catalog.iter().all(|e| e.product_type != "metal"));
}

#[tokio::test]
async fn verify_code_prefers_a_live_campaign() {
    let db = new_test_database().await;
    let api = MarketingApi::new(db);
    insert_discount_code(&api, "summer15", 10).await;
    api.upsert_campaign(summer_campaign()).await.unwrap();

    let discount = api.verify_code(" SUMMER15 ").await.unwrap().unwrap();
    assert!(discount.valid);
    assert_eq!(discount.discount_type, "campaign");
    assert_eq!(discount.percent, 15);
}

#[tokio::test]
async fn expired_campaign_falls_back_to_the_standalone_code() {
    let db = new_test_database().await;
    let api = MarketingApi::new(db.clone());
    insert_discount_code(&api, "summer15", 10).await;
    let mut campaign = summer_campaign();
    campaign.ends_at = Some(Utc::now() - Duration::days(1));
    api.upsert_campaign(campaign).await.unwrap();

    let discount = api.verify_code("summer15").await.unwrap().unwrap();
    assert_eq!(discount.discount_type, "code");
    assert_eq!(discount.percent, 10);

    // the standalone match bumped the usage counter
    let (count,): (i64,) = sqlx::query_as("SELECT usage_count FROM discount_codes WHERE code = 'summer15'")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

// Codes are normalized on save with the same rules `verify_code` applies to submissions, so a code an admin types
// in mixed case still matches at checkout.
#[tokio::test]
async fn discount_codes_are_normalized_on_save() {
    let db = new_test_database().await;
    let api = MarketingApi::new(db);
    insert_discount_code(&api, " Welcome10 ", 10).await;

    let discount = api.verify_code("WELCOME10").await.unwrap().unwrap();
    assert_eq!(discount.code, "welcome10");
    assert_eq!(discount.percent, 10);
}

#[tokio::test]
async fn saving_a_discount_code_twice_updates_it() {
    let db = new_test_database().await;
    let api = MarketingApi::new(db);
    insert_discount_code(&api, "welcome10", 10).await;
    // one redemption before the update
    api.verify_code("welcome10").await.unwrap().unwrap();

    let updated = api
        .upsert_discount_code(NewDiscountCode {
            code: "welcome10".to_string(),
            percent: 20,
            description: None,
            active: true,
        })
        .await
        .unwrap();
    assert_eq!(updated.percent, 20);
    assert_eq!(updated.usage_count, 1);

    let discount = api.verify_code("welcome10").await.unwrap().unwrap();
    assert_eq!(discount.percent, 20);
}

#[tokio::test]
async fn deactivated_discount_code_no_longer_verifies() {
    let db = new_test_database().await;
    let api = MarketingApi::new(db);
    insert_discount_code(&api, "welcome10", 10).await;
    api.upsert_discount_code(NewDiscountCode {
        code: "welcome10".to_string(),
        percent: 10,
        description: None,
        active: false,
    })
    .await
    .unwrap();
    assert!(api.verify_code("welcome10").await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_code_returns_none() {
    let db = new_test_database().await;
    let api = MarketingApi::new(db);
    assert!(api.verify_code("nonexistent").await.unwrap().is_none());
    assert!(api.verify_code("   ").await.unwrap().is_none());
}

#[tokio::test]
async fn active_campaign_respects_the_date_window() {
    let db = new_test_database().await;
    let api = MarketingApi::new(db);
    let mut campaign = summer_campaign();
    campaign.starts_at = Some(Utc::now() + Duration::days(7));
    api.upsert_campaign(campaign).await.unwrap();
    assert!(api.active_campaign().await.unwrap().is_none());

    let mut live = summer_campaign();
    live.code = "autumn10".to_string();
    live.percent = 10;
    api.upsert_campaign(live).await.unwrap();
    let active = api.active_campaign().await.unwrap().unwrap();
    assert_eq!(active.code, "autumn10");
}

#[tokio::test]
async fn newsletter_subscription_is_idempotent() {
    let db = new_test_database().await;
    let api = MarketingApi::new(db);
    assert!(api.subscribe_email("Penny@Example.com").await.unwrap());
    assert!(!api.subscribe_email("penny@example.com ").await.unwrap());
}

#[tokio::test]
async fn blog_crud() {
    let db = new_test_database().await;
    let api = BlogApi::new(db);
    let draft = NewPost {
        slug: "caring-for-canvas-prints".to_string(),
        title: "Caring for canvas prints".to_string(),
        body: "Keep them out of direct sunlight.".to_string(),
        published: false,
    };
    let post = api.create_post(draft.clone()).await.unwrap();
    assert!(api.posts(false).await.unwrap().is_empty());
    assert_eq!(api.posts(true).await.unwrap().len(), 1);

    let mut published = draft;
    published.published = true;
    let post = api.update_post(post.id, published).await.unwrap();
    assert_eq!(api.posts(false).await.unwrap().len(), 1);

    assert!(api.delete_post(post.id).await.unwrap());
    assert!(!api.delete_post(post.id).await.unwrap());
    assert!(api.posts(true).await.unwrap().is_empty());
}
