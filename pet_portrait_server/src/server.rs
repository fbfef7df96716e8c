use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use gelato_tools::GelatoApi;
use log::*;
use pet_portrait_engine::{events::EventProducers, BlogApi, CatalogApi, MarketingApi, OrderFlowApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{gelato::create_gelato_event_handlers, paypal::PayPalApi},
    middleware::{AdminAuthMiddlewareFactory, HmacMiddlewareFactory},
    routes::{
        health,
        shipping_methods,
        ActiveCampaignRoute,
        AdminCreatePostRoute,
        AdminDeleteOrderRoute,
        AdminDeletePostRoute,
        AdminProductsRoute,
        AdminSearchOrdersRoute,
        AdminUpdatePostRoute,
        AdminUpdateStatusRoute,
        AdminUpsertCampaignRoute,
        AdminUpsertDiscountCodeRoute,
        AdminUpsertProductRoute,
        BlogPostRoute,
        BlogPostsRoute,
        CreateOrderRoute,
        ProductsFeedRoute,
        SubscribeNewsletterRoute,
        VerifyDiscountRoute,
    },
    webhook_routes::GelatoWebhookRoute,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let gelato_api =
        GelatoApi::new(config.gelato.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    // The fulfillment pipeline is shared across workers, so it is built and started once, before the HTTP server.
    let handlers = create_gelato_event_handlers(db.clone(), gelato_api.clone());
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, gelato_api, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    gelato_api: GelatoApi,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let order_flow_api = OrderFlowApi::new(db.clone(), producers.clone());
        let marketing_api = MarketingApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let blog_api = BlogApi::new(db.clone());
        let paypal_api = PayPalApi::new(config.paypal.clone());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ppg::access_log"))
            .app_data(web::Data::new(order_flow_api))
            .app_data(web::Data::new(marketing_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(blog_api))
            .app_data(web::Data::new(gelato_api.clone()))
            .app_data(web::Data::new(paypal_api))
            .app_data(web::Data::new(config.clone()));
        // Back-office routes, guarded by the admin bearer token
        let admin_scope = web::scope("/admin")
            .wrap(AdminAuthMiddlewareFactory::new(config.admin_token.clone()))
            .service(AdminSearchOrdersRoute::<SqliteDatabase>::new())
            .service(AdminUpdateStatusRoute::<SqliteDatabase>::new())
            .service(AdminDeleteOrderRoute::<SqliteDatabase>::new())
            .service(AdminProductsRoute::<SqliteDatabase>::new())
            .service(AdminUpsertProductRoute::<SqliteDatabase>::new())
            .service(AdminUpsertCampaignRoute::<SqliteDatabase>::new())
            .service(AdminUpsertDiscountCodeRoute::<SqliteDatabase>::new())
            .service(AdminCreatePostRoute::<SqliteDatabase>::new())
            .service(AdminUpdatePostRoute::<SqliteDatabase>::new())
            .service(AdminDeletePostRoute::<SqliteDatabase>::new());
        let webhook_scope = web::scope("/webhooks")
            .wrap(HmacMiddlewareFactory::new(
                &config.webhook.signature_header,
                config.webhook.hmac_secret.clone(),
                config.webhook.check_signature,
            ))
            .service(GelatoWebhookRoute::<SqliteDatabase>::new());
        let api_scope = web::scope("/api")
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(VerifyDiscountRoute::<SqliteDatabase>::new())
            .service(ActiveCampaignRoute::<SqliteDatabase>::new())
            .service(SubscribeNewsletterRoute::<SqliteDatabase>::new())
            .service(shipping_methods)
            .service(ProductsFeedRoute::<SqliteDatabase>::new())
            .service(BlogPostsRoute::<SqliteDatabase>::new())
            .service(BlogPostRoute::<SqliteDatabase>::new())
            .service(admin_scope);
        app.service(health).service(api_scope).service(webhook_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?;
    info!("🚀️ Server bound to {host}:{port}");
    Ok(srv.run())
}
