//! The Gelato fulfillment hook.
//!
//! [`create_gelato_event_handlers`] wires an `on_order_paid` hook into the engine's event pipeline. When a checkout
//! lands, the hook maps the product and size to a Gelato catalog UID, builds an order request from the stored
//! customer address and photo urls, and submits it. The outcome is written back to the order as a fulfillment record
//! or a failure event; a failed submission never unwinds the checkout.
use gelato_tools::{
    data_objects::{GelatoAddress, GelatoFile, GelatoOrderItem, GelatoOrderRequest},
    GelatoApi,
};
use log::*;
use pet_portrait_engine::{
    db_types::{Customer, Order},
    events::{EventHandlers, EventHooks, OrderPaidEvent},
    traits::StorefrontDatabase,
    SqliteDatabase,
};

pub const GELATO_EVENT_BUFFER_SIZE: usize = 25;

/// Gelato catalog UIDs for each physical (product_type, size) combination. Digital downloads have no entry; they
/// never reach the print vendor.
const GELATO_PRODUCT_UIDS: [(&str, &str, &str); 20] = [
    ("canvas", "8x10", "canvas_200x250-mm-8x10-inch_canvas_wood-fsc-slim_4-0_ver"),
    ("canvas", "12x16", "canvas_300x400-mm-12x16-inch_canvas_wood-fsc-slim_4-0_ver"),
    ("canvas", "16x20", "canvas_400x500-mm-16x20-inch_canvas_wood-fsc-slim_4-0_ver"),
    ("canvas", "18x24", "canvas_450x600-mm-18x24-inch_canvas_wood-fsc-slim_4-0_ver"),
    ("canvas", "24x36", "canvas_600x900-mm-24x36-inch_canvas_wood-fsc-slim_4-0_ver"),
    ("framed_canvas", "8x10", "framed_canvas_200x250-mm-8x10-inch_black_wood_4-0_ver"),
    ("framed_canvas", "12x16", "framed_canvas_300x400-mm-12x16-inch_black_wood_4-0_ver"),
    ("framed_canvas", "16x20", "framed_canvas_400x500-mm-16x20-inch_black_wood_4-0_ver"),
    ("framed_canvas", "18x24", "framed_canvas_450x600-mm-18x24-inch_black_wood_4-0_ver"),
    ("framed_canvas", "24x36", "framed_canvas_600x900-mm-24x36-inch_black_wood_4-0_ver"),
    ("poster", "8x10", "flat_200x250-mm-8x10-inch_200-gsm-80lb-coated-silk_4-0_ver"),
    ("poster", "12x16", "flat_300x400-mm-12x16-inch_200-gsm-80lb-coated-silk_4-0_ver"),
    ("poster", "16x20", "flat_400x500-mm-16x20-inch_200-gsm-80lb-coated-silk_4-0_ver"),
    ("poster", "18x24", "flat_450x600-mm-18x24-inch_200-gsm-80lb-coated-silk_4-0_ver"),
    ("poster", "24x36", "flat_600x900-mm-24x36-inch_200-gsm-80lb-coated-silk_4-0_ver"),
    ("metal", "8x10", "metal_200x250-mm-8x10-inch_3-mm_gloss_4-0_ver"),
    ("metal", "12x16", "metal_300x400-mm-12x16-inch_3-mm_gloss_4-0_ver"),
    ("metal", "16x20", "metal_400x500-mm-16x20-inch_3-mm_gloss_4-0_ver"),
    ("metal", "18x24", "metal_450x600-mm-18x24-inch_3-mm_gloss_4-0_ver"),
    ("metal", "24x36", "metal_600x900-mm-24x36-inch_3-mm_gloss_4-0_ver"),
];

pub fn gelato_product_uid(product_type: &str, size: &str) -> Option<&'static str> {
    GELATO_PRODUCT_UIDS.iter().find(|(p, s, _)| *p == product_type && *s == size).map(|(_, _, uid)| *uid)
}

fn build_order_request(order: &Order, customer: &Customer, product_uid: &str) -> GelatoOrderRequest {
    let files = order.photo_urls.0.iter().cloned().map(GelatoFile::default_print_file).collect();
    let item = GelatoOrderItem {
        item_reference_id: format!("{}-1", order.order_id.as_str()),
        product_uid: product_uid.to_string(),
        files,
        quantity: 1,
    };
    let address = GelatoAddress {
        first_name: customer.first_name.clone(),
        last_name: customer.last_name.clone(),
        address_line1: customer.address_line1.clone(),
        address_line2: customer.address_line2.clone(),
        city: customer.city.clone(),
        state: customer.state.clone(),
        post_code: customer.postal_code.clone(),
        country: customer.country.clone(),
        email: customer.email.clone(),
    };
    GelatoOrderRequest::new(order.order_id.as_str().to_string(), vec![item], address)
}

/// Builds the event handler set for the server. The returned [`EventHandlers`] must be started (and its producers
/// handed to the order flow) before the HTTP workers spin up.
pub fn create_gelato_event_handlers(db: SqliteDatabase, api: GelatoApi) -> EventHandlers {
    let mut hooks = EventHooks::default();
    hooks.on_order_paid(move |event: OrderPaidEvent| {
        let db = db.clone();
        let api = api.clone();
        Box::pin(async move {
            submit_order(&db, &api, event).await;
        })
    });
    EventHandlers::new(GELATO_EVENT_BUFFER_SIZE, hooks)
}

async fn submit_order(db: &SqliteDatabase, api: &GelatoApi, event: OrderPaidEvent) {
    let OrderPaidEvent { order, customer } = event;
    let order_id = order.order_id.clone();
    let Some(product_uid) = gelato_product_uid(&order.product_type, &order.size) else {
        info!("🖨️ Order {order_id} ({} {}) has no print vendor mapping. Skipping fulfillment.", order.product_type, order.size);
        return;
    };
    if !api.is_configured() {
        warn!("🖨️ Gelato is not configured. Order {order_id} will not be submitted for fulfillment.");
        return;
    }
    if order.photo_urls.0.is_empty() {
        warn!("🖨️ Order {order_id} has no photos. Skipping fulfillment.");
        return;
    }
    if !customer.has_complete_address() {
        warn!("🖨️ Order {order_id} has an incomplete shipping address. Skipping fulfillment.");
        return;
    }
    let request = build_order_request(&order, &customer, product_uid);
    match api.create_order(request).await {
        Ok(response) => {
            info!("🖨️ Order {order_id} submitted to Gelato as {}.", response.id);
            if let Err(e) = db.record_fulfillment_created(&order_id, &response.id).await {
                error!("🖨️ Could not record the Gelato submission for {order_id}. {e}");
            }
        },
        Err(e) => {
            error!("🖨️ Gelato rejected order {order_id}. {e}");
            if let Err(e) = db.record_fulfillment_failure(&order_id, &e.to_string()).await {
                error!("🖨️ Could not record the Gelato failure for {order_id}. {e}");
            }
        },
    }
}
