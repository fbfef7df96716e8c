//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause
//! the current worker to stop processing new requests. For this reason, any long, non-cpu-bound operation (e.g. I/O,
//! database operations, etc.) should be expressed as futures or asynchronous functions. Async handlers get executed
//! concurrently by worker threads and thus don't block execution.
use actix_web::{get, web, HttpResponse, Responder};
use gelato_tools::GelatoApi;
use log::*;
use pet_portrait_engine::{
    db_types::{NewCampaign, NewDiscountCode, NewPost, NewProduct},
    order_objects::OrderQueryFilter,
    pricing::calculate_price,
    traits::{BlogManagement, CatalogManagement, MarketingManagement, StorefrontDatabase},
    BlogApi,
    CatalogApi,
    MarketingApi,
    OrderFlowApi,
    OrderFlowError,
};
use ppg_common::UsdAmount;

use crate::{
    config::ServerConfig,
    data_objects::{
        CreateOrderRequest,
        CreateOrderResponse,
        JsonResponse,
        OrderIdParams,
        ShippingMethodsQuery,
        SubscribeRequest,
        UpdateStatusParams,
        VerifyCodeRequest,
    },
    errors::ServerError,
    feed::merchant_feed,
    integrations::paypal::PayPalApi,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------  Checkout  ----------------------------------------------------
route!(create_order => Post "/orders/create" impl StorefrontDatabase);
/// The checkout endpoint.
///
/// The storefront calls this after PayPal approves the payment in the browser. The server never trusts the
/// submitted price: it recomputes it from the pricing tables and rejects unknown products, unknown sizes and
/// underpayment with a 400. When PayPal credentials are configured, the capture is verified against the PayPal
/// Orders API before anything is written.
///
/// Replays of an already-persisted order id are answered with the stored order, so storefront retries are safe.
pub async fn create_order<B: StorefrontDatabase>(
    api: web::Data<OrderFlowApi<B>>,
    paypal: web::Data<PayPalApi>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, ServerError> {
    let (customer, order, price) = body.into_inner().into_parts();
    debug!("🎨️ POST checkout for order [{}]: {} / {}", order.order_id, order.product_type, order.size);
    let calculated = calculate_price(&order.product_type, &order.size).map_err(OrderFlowError::from)?;
    paypal.confirm_capture(order.paypal_order_id.as_deref(), calculated).await?;
    let client_price = UsdAmount::from_dollars(price);
    let (order, inserted) = api.process_checkout(customer, order, client_price).await?;
    if !inserted {
        info!("🎨️ Checkout replay for order [{}]. Returning the stored order.", order.order_id);
    }
    let response = CreateOrderResponse {
        order_id: order.order_id,
        status: order.status,
        total_price: order.total_price.whole_dollars(),
        created_at: order.created_at,
    };
    Ok(HttpResponse::Ok().json(response))
}

//----------------------------------------------  Discounts  ----------------------------------------------------
route!(verify_discount => Post "/discounts/verify" impl MarketingManagement);
pub async fn verify_discount<B: MarketingManagement>(
    api: web::Data<MarketingApi<B>>,
    body: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ServerError> {
    let code = body.into_inner().code;
    trace!("🏷️️ POST discount verification");
    match api.verify_code(&code).await? {
        Some(discount) => Ok(HttpResponse::Ok().json(discount)),
        None => Err(ServerError::NoRecordFound("No active discount matches the supplied code".to_string())),
    }
}

route!(active_campaign => Get "/marketing/campaign" impl MarketingManagement);
/// The live campaign banner. Returns `null` rather than a 404 when no campaign is running, since the storefront
/// polls this on every page load.
pub async fn active_campaign<B: MarketingManagement>(
    api: web::Data<MarketingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let campaign = api.active_campaign().await?;
    Ok(HttpResponse::Ok().json(campaign))
}

//----------------------------------------------  Newsletter  ----------------------------------------------------
route!(subscribe_newsletter => Post "/newsletter/subscribe" impl MarketingManagement);
pub async fn subscribe_newsletter<B: MarketingManagement>(
    api: web::Data<MarketingApi<B>>,
    body: web::Json<SubscribeRequest>,
) -> Result<HttpResponse, ServerError> {
    let email = body.into_inner().email;
    let fresh = api.subscribe_email(&email).await?;
    let message = if fresh { "Subscribed." } else { "Already subscribed." };
    Ok(HttpResponse::Ok().json(JsonResponse::success(message)))
}

//----------------------------------------------  Shipping  ----------------------------------------------------
#[get("/shipping-methods")]
pub async fn shipping_methods(
    api: web::Data<GelatoApi>,
    query: web::Query<ShippingMethodsQuery>,
) -> Result<HttpResponse, ServerError> {
    let country = query.into_inner().country;
    debug!("🖨️️ GET shipping methods for {}", country.as_deref().unwrap_or("all countries"));
    let methods = api.shipping_methods(country.as_deref()).await.map_err(|e| {
        warn!("🖨️️ Could not fetch shipping methods from the vendor. {e}");
        ServerError::BackendError(format!("Could not fetch shipping methods. {e}"))
    })?;
    Ok(HttpResponse::Ok().json(methods))
}

//----------------------------------------------  Product feed  ----------------------------------------------------
route!(products_feed => Get "/products/feed" impl CatalogManagement);
/// Google Merchant RSS 2.0 feed of every active (product, size) combination.
pub async fn products_feed<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServerError> {
    let catalog = api.catalog().await?;
    let xml = merchant_feed(&catalog, &config.store_url);
    Ok(HttpResponse::Ok().content_type("application/rss+xml; charset=utf-8").body(xml))
}

//----------------------------------------------  Blog (public)  ----------------------------------------------------
route!(blog_posts => Get "/blog" impl BlogManagement);
pub async fn blog_posts<B: BlogManagement>(api: web::Data<BlogApi<B>>) -> Result<HttpResponse, ServerError> {
    let posts = api.posts(false).await?;
    Ok(HttpResponse::Ok().json(posts))
}

route!(blog_post => Get "/blog/{id}" impl BlogManagement);
pub async fn blog_post<B: BlogManagement>(
    api: web::Data<BlogApi<B>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServerError> {
    let post_id = path.into_inner();
    let post = api
        .post(post_id)
        .await?
        .filter(|p| p.published)
        .ok_or_else(|| ServerError::NoRecordFound(format!("Post {post_id}")))?;
    Ok(HttpResponse::Ok().json(post))
}

//----------------------------------------------  Admin: orders  ----------------------------------------------------
route!(admin_search_orders => Post "/orders" impl StorefrontDatabase);
pub async fn admin_search_orders<B: StorefrontDatabase>(
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<OrderQueryFilter>,
) -> Result<HttpResponse, ServerError> {
    let filter = body.into_inner();
    debug!("🎨️ Admin order search: {filter}");
    let result = api.search_orders(filter).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(admin_update_status => Post "/orders/update-status" impl StorefrontDatabase);
pub async fn admin_update_status<B: StorefrontDatabase>(
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<UpdateStatusParams>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    let reason = params.reason.unwrap_or_else(|| "Manual status change".to_string());
    let order = api.update_status(&params.order_id, params.status, &reason).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(admin_delete_order => Post "/orders/delete" impl StorefrontDatabase);
pub async fn admin_delete_order<B: StorefrontDatabase>(
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<OrderIdParams>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    let order = api.delete_order(&params.order_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Order {} deleted.", order.order_id))))
}

//----------------------------------------------  Admin: catalog  ----------------------------------------------------
route!(admin_products => Get "/products" impl CatalogManagement);
pub async fn admin_products<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    let catalog = api.full_catalog().await?;
    Ok(HttpResponse::Ok().json(catalog))
}

route!(admin_upsert_product => Post "/products" impl CatalogManagement);
pub async fn admin_upsert_product<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    body: web::Json<NewProduct>,
) -> Result<HttpResponse, ServerError> {
    let product = api.upsert_product(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

//----------------------------------------------  Admin: campaigns  --------------------------------------------------
route!(admin_upsert_campaign => Post "/campaigns" impl MarketingManagement);
pub async fn admin_upsert_campaign<B: MarketingManagement>(
    api: web::Data<MarketingApi<B>>,
    body: web::Json<NewCampaign>,
) -> Result<HttpResponse, ServerError> {
    let campaign = api.upsert_campaign(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(campaign))
}

route!(admin_upsert_discount_code => Post "/discount-codes" impl MarketingManagement);
pub async fn admin_upsert_discount_code<B: MarketingManagement>(
    api: web::Data<MarketingApi<B>>,
    body: web::Json<NewDiscountCode>,
) -> Result<HttpResponse, ServerError> {
    let discount = api.upsert_discount_code(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(discount))
}

//----------------------------------------------  Admin: blog  ----------------------------------------------------
route!(admin_create_post => Post "/blog" impl BlogManagement);
pub async fn admin_create_post<B: BlogManagement>(
    api: web::Data<BlogApi<B>>,
    body: web::Json<NewPost>,
) -> Result<HttpResponse, ServerError> {
    let post = api.create_post(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

route!(admin_update_post => Put "/blog/{id}" impl BlogManagement);
pub async fn admin_update_post<B: BlogManagement>(
    api: web::Data<BlogApi<B>>,
    path: web::Path<i64>,
    body: web::Json<NewPost>,
) -> Result<HttpResponse, ServerError> {
    let post = api.update_post(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

route!(admin_delete_post => Delete "/blog/{id}" impl BlogManagement);
pub async fn admin_delete_post<B: BlogManagement>(
    api: web::Data<BlogApi<B>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ServerError> {
    let post_id = path.into_inner();
    if api.delete_post(post_id).await? {
        Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Post {post_id} deleted."))))
    } else {
        Err(ServerError::NoRecordFound(format!("Post {post_id}")))
    }
}
