//! Bearer-token middleware for the admin back-office.
//!
//! Every request under `/api/admin` must carry `Authorization: Bearer <token>` matching the configured
//! `PPG_ADMIN_TOKEN`. Tokens are compared via their SHA-256 digests so the comparison time does not depend on how
//! many leading characters match. An empty configured token rejects everything.

use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    Error,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::{debug, trace};
use ppg_common::Secret;
use sha2::{Digest, Sha256};

pub struct AdminAuthMiddlewareFactory {
    token: Secret<String>,
}

impl AdminAuthMiddlewareFactory {
    pub fn new(token: Secret<String>) -> Self {
        AdminAuthMiddlewareFactory { token }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = AdminAuthMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminAuthMiddlewareService { token: self.token.clone(), service: Rc::new(service) })
    }
}

pub struct AdminAuthMiddlewareService<S> {
    token: Secret<String>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let expected = self.token.reveal().clone();
        Box::pin(async move {
            trace!("🔐️ Checking admin bearer token");
            if expected.is_empty() {
                debug!("🔐️ No admin token is configured. Denying access.");
                return Err(ErrorUnauthorized("Admin access is not configured."));
            }
            let supplied = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .ok_or_else(|| {
                    debug!("🔐️ Missing or malformed Authorization header on admin request.");
                    ErrorUnauthorized("Missing bearer token.")
                })?;
            if Sha256::digest(supplied.as_bytes()) == Sha256::digest(expected.as_bytes()) {
                trace!("🔐️ Admin token accepted ✅️");
                service.call(req).await
            } else {
                debug!("🔐️ Invalid admin token presented. Denying access.");
                Err(ErrorUnauthorized("Invalid bearer token."))
            }
        })
    }
}
