mod admin;
mod hmac;

pub use admin::{AdminAuthMiddlewareFactory, AdminAuthMiddlewareService};
pub use hmac::{HmacMiddlewareFactory, HmacMiddlewareService};
