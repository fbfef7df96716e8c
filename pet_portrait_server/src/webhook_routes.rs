//----------------------------------------------   Fulfillment webhook   ---------------------------------------------
use actix_web::{web, HttpRequest, HttpResponse};
use gelato_tools::data_objects::WebhookEnvelope;
use log::*;
use pet_portrait_engine::{
    order_objects::FulfillmentUpdate,
    traits::{StorefrontApiError, StorefrontDatabase},
    OrderFlowApi,
    OrderFlowError,
};

use crate::{data_objects::JsonResponse, route};

pub const ORDER_STATUS_TOPIC: &str = "order.status.changed";

route!(gelato_webhook => Post "/gelato" impl StorefrontDatabase);
/// Receives fulfillment-status webhooks from the print vendor.
///
/// The HMAC middleware has already verified the payload signature by the time this handler runs. Responses are
/// always in the 200 range, otherwise the vendor will keep retrying: a payload we cannot apply (unknown order
/// reference, unexpected topic) is acknowledged with a failure body and logged for follow-up.
pub async fn gelato_webhook<B: StorefrontDatabase>(
    req: HttpRequest,
    body: web::Json<WebhookEnvelope>,
    api: web::Data<OrderFlowApi<B>>,
) -> HttpResponse {
    trace!("🖨️️ Received webhook request: {}", req.uri());
    let envelope = body.into_inner();
    if envelope.topic != ORDER_STATUS_TOPIC {
        debug!("🖨️️ Ignoring webhook with topic '{}'", envelope.topic);
        return HttpResponse::Ok().json(JsonResponse::success(format!("Ignoring topic '{}'.", envelope.topic)));
    }
    let data = envelope.data;
    let update = FulfillmentUpdate {
        order_reference: data.order_reference_id.into(),
        vendor_status: data.fulfillment_status,
        tracking_number: data.tracking_code,
        carrier: data.carrier,
    };
    let result = match api.process_fulfillment_update(update).await {
        Ok(order) => {
            info!("🖨️️ Order [{}] is now {}.", order.order_id, order.status);
            JsonResponse::success(format!("Order {} updated.", order.order_id))
        },
        Err(OrderFlowError::OrderNotFound(id)) => {
            warn!("🖨️️ Webhook referenced unknown order [{id}]. Acknowledging so the vendor stops retrying.");
            JsonResponse::failure(format!("Order {id} is not known to this store."))
        },
        Err(OrderFlowError::Backend(StorefrontApiError::DatabaseError(e))) => {
            warn!("🖨️️ Could not apply fulfillment update. {e}");
            JsonResponse::failure(e)
        },
        Err(e) => {
            warn!("🖨️️ Unexpected error while handling fulfillment webhook. {e}");
            JsonResponse::failure("Unexpected error handling fulfillment update.")
        },
    };
    HttpResponse::Ok().json(result)
}
