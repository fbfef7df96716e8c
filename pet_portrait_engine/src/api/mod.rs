mod blog_api;
mod catalog_api;
mod marketing_api;
mod order_flow_api;

pub use blog_api::BlogApi;
pub use catalog_api::CatalogApi;
pub use marketing_api::{MarketingApi, VerifiedDiscount};
pub use order_flow_api::{OrderFlowApi, OrderFlowError};
