use log::*;
use ppg_common::Secret;

const DEFAULT_ORDER_API_URL: &str = "https://order.gelatoapis.com/v4";
const DEFAULT_SHIPMENT_API_URL: &str = "https://shipment.gelatoapis.com/v1";
const DEFAULT_PRODUCT_API_URL: &str = "https://product.gelatoapis.com/v3";

#[derive(Debug, Clone)]
pub struct GelatoConfig {
    pub api_key: Secret<String>,
    pub order_api_url: String,
    pub shipment_api_url: String,
    pub product_api_url: String,
}

impl Default for GelatoConfig {
    fn default() -> Self {
        Self {
            api_key: Secret::default(),
            order_api_url: DEFAULT_ORDER_API_URL.to_string(),
            shipment_api_url: DEFAULT_SHIPMENT_API_URL.to_string(),
            product_api_url: DEFAULT_PRODUCT_API_URL.to_string(),
        }
    }
}

impl GelatoConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_key = Secret::new(std::env::var("PPG_GELATO_API_KEY").unwrap_or_else(|_| {
            warn!("PPG_GELATO_API_KEY not set. Print-order submission will fail until it is configured.");
            String::default()
        }));
        let order_api_url =
            std::env::var("PPG_GELATO_ORDER_API_URL").unwrap_or_else(|_| DEFAULT_ORDER_API_URL.to_string());
        let shipment_api_url =
            std::env::var("PPG_GELATO_SHIPMENT_API_URL").unwrap_or_else(|_| DEFAULT_SHIPMENT_API_URL.to_string());
        let product_api_url =
            std::env::var("PPG_GELATO_PRODUCT_API_URL").unwrap_or_else(|_| DEFAULT_PRODUCT_API_URL.to_string());
        Self { api_key, order_api_url, shipment_api_url, product_api_url }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_set()
    }
}
