//! Webhook signature middleware.
//!
//! Gelato signs the raw request body with the shared webhook secret and puts the base64 HMAC-SHA256 in a header
//! (`x-gelato-signature` by default). Wrap the webhook scope with this middleware so forged payloads never reach a
//! handler. Verification consumes the request body, so the payload is restored before the call is forwarded.
//!
//! Signatures are compared via SHA-256 digests of the two strings, as [`crate::middleware::admin`] does for bearer
//! tokens.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_http::h1;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorBadRequest, ErrorForbidden},
    web,
    Error,
};
use futures::future::LocalBoxFuture;
use log::{trace, warn};
use ppg_common::Secret;
use sha2::{Digest, Sha256};

use crate::helpers::calculate_hmac;

pub struct HmacMiddlewareFactory {
    signature_header: String,
    secret: Secret<String>,
    // When false, signatures are not checked and every call is forwarded. Local development only.
    enabled: bool,
}

impl HmacMiddlewareFactory {
    pub fn new(signature_header: &str, secret: Secret<String>, enabled: bool) -> Self {
        HmacMiddlewareFactory { signature_header: signature_header.into(), secret, enabled }
    }
}

impl<S, B> Transform<S, ServiceRequest> for HmacMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = HmacMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(HmacMiddlewareService {
            signature_header: self.signature_header.clone(),
            secret: self.secret.clone(),
            enabled: self.enabled,
            service: Rc::new(service),
        }))
    }
}

pub struct HmacMiddlewareService<S> {
    signature_header: String,
    secret: Secret<String>,
    enabled: bool,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for HmacMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let secret = self.secret.reveal().clone();
        let signature_header = self.signature_header.clone();
        let enabled = self.enabled;
        Box::pin(async move {
            if !enabled {
                trace!("🔐️ Webhook signature checks are disabled. Forwarding request.");
                return service.call(req).await;
            }
            // Grab the claimed signature before touching the body. A non-UTF8 header value cannot match a base64
            // digest, so it is treated the same as a forgery.
            let claimed = req
                .headers()
                .get(&signature_header)
                .ok_or_else(|| {
                    warn!("🔐️ Webhook request arrived without a {signature_header} header. Denying access.");
                    ErrorForbidden("No HMAC signature found.")
                })?
                .to_str()
                .unwrap_or_default()
                .to_string();
            let body = req.extract::<web::Bytes>().await.map_err(|e| {
                warn!("🔐️ Could not read the webhook body for signing: {e:?}");
                ErrorBadRequest("Failed to extract request data.")
            })?;
            let expected = calculate_hmac(&secret, body.as_ref());
            if Sha256::digest(claimed.as_bytes()) == Sha256::digest(expected.as_bytes()) {
                trace!("🔐️ Webhook signature verified ✅️");
                req.set_payload(restore_payload(body));
                service.call(req).await
            } else {
                warn!("🔐️ Webhook signature mismatch. Denying access.");
                Err(ErrorForbidden("Invalid HMAC signature."))
            }
        })
    }
}

// Verification drains the request body, so hand the handler a fresh payload carrying the same bytes.
fn restore_payload(body: web::Bytes) -> Payload {
    let (_, mut pl) = h1::Payload::create(true);
    pl.unread_data(body);
    Payload::from(pl)
}
