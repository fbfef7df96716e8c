//! Server configuration.
//!
//! Everything is read from environment variables at startup. Missing values fall back to (loudly logged) defaults
//! so that a development instance comes up without any configuration at all, while a production deployment gets a
//! warning for every default it is silently relying on.
use std::env;

use gelato_tools::GelatoConfig;
use log::*;
use ppg_common::{parse_boolean_flag, Secret};

const DEFAULT_PPG_HOST: &str = "127.0.0.1";
const DEFAULT_PPG_PORT: u16 = 8360;
const DEFAULT_STORE_URL: &str = "http://localhost:8360";
const DEFAULT_WEBHOOK_SIGNATURE_HEADER: &str = "x-gelato-signature";
const DEFAULT_PAYPAL_API_URL: &str = "https://api-m.sandbox.paypal.com";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The public storefront URL, used for links in the product feed.
    pub store_url: String,
    /// The bearer token that guards the `/api/admin` scope.
    pub admin_token: Secret<String>,
    pub webhook: WebhookConfig,
    /// Print-vendor API configuration.
    pub gelato: GelatoConfig,
    /// PayPal capture verification. Optional; when unset, checkout skips the capture check with a warning.
    pub paypal: PayPalConfig,
}

/// HMAC verification settings for the fulfillment webhook endpoint.
#[derive(Clone, Debug)]
pub struct WebhookConfig {
    pub hmac_secret: Secret<String>,
    /// The header carrying the base64 HMAC-SHA256 of the raw body.
    pub signature_header: String,
    /// Signature checks are on unless explicitly disabled. Disabling is for local development only.
    pub check_signature: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            hmac_secret: Secret::new(String::default()),
            signature_header: DEFAULT_WEBHOOK_SIGNATURE_HEADER.to_string(),
            check_signature: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PayPalConfig {
    pub client_id: String,
    pub secret: Secret<String>,
    pub api_url: String,
}

impl PayPalConfig {
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && self.secret.is_set()
    }

    pub fn from_env_or_default() -> Self {
        let client_id = env::var("PPG_PAYPAL_CLIENT_ID").ok().unwrap_or_default();
        let secret = Secret::new(env::var("PPG_PAYPAL_SECRET").ok().unwrap_or_default());
        let api_url = env::var("PPG_PAYPAL_API_URL").ok().unwrap_or_else(|| {
            info!("🪛️ PPG_PAYPAL_API_URL is not set. Using the sandbox, {DEFAULT_PAYPAL_API_URL}.");
            DEFAULT_PAYPAL_API_URL.to_string()
        });
        let result = Self { client_id, secret, api_url };
        if !result.is_configured() {
            warn!(
                "🪛️ PPG_PAYPAL_CLIENT_ID and/or PPG_PAYPAL_SECRET are not set. PayPal capture verification is \
                 DISABLED. Orders will be accepted on the client's word that payment went through."
            );
        }
        result
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PPG_HOST.to_string(),
            port: DEFAULT_PPG_PORT,
            database_url: String::default(),
            store_url: DEFAULT_STORE_URL.to_string(),
            admin_token: Secret::new(String::default()),
            webhook: WebhookConfig::default(),
            gelato: GelatoConfig::default(),
            paypal: PayPalConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("PPG_HOST").ok().unwrap_or_else(|| DEFAULT_PPG_HOST.into());
        let port = env::var("PPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for PPG_PORT. {e} Using the default, {DEFAULT_PPG_PORT}, instead."
                    );
                    DEFAULT_PPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PPG_PORT);
        let database_url = env::var("PPG_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ PPG_DATABASE_URL is not set. Please set it to the URL for the storefront database.");
            String::default()
        });
        let store_url = env::var("PPG_STORE_URL").ok().unwrap_or_else(|| DEFAULT_STORE_URL.to_string());
        let admin_token = env::var("PPG_ADMIN_TOKEN").map(Secret::new).unwrap_or_else(|_| {
            warn!("🪛️ PPG_ADMIN_TOKEN is not set. The admin endpoints will reject every request.");
            Secret::new(String::default())
        });
        let webhook = WebhookConfig::from_env_or_default();
        let gelato = GelatoConfig::new_from_env_or_default();
        let paypal = PayPalConfig::from_env_or_default();
        Self { host, port, database_url, store_url, admin_token, webhook, gelato, paypal }
    }
}

impl WebhookConfig {
    pub fn from_env_or_default() -> Self {
        let hmac_secret = env::var("PPG_WEBHOOK_SECRET").map(Secret::new).unwrap_or_else(|_| {
            warn!("🪛️ PPG_WEBHOOK_SECRET is not set. Incoming webhooks will fail their signature check.");
            Secret::new(String::default())
        });
        let signature_header = env::var("PPG_WEBHOOK_SIGNATURE_HEADER")
            .ok()
            .unwrap_or_else(|| DEFAULT_WEBHOOK_SIGNATURE_HEADER.to_string());
        let check_signature = !parse_boolean_flag(env::var("PPG_WEBHOOK_SKIP_SIGNATURE").ok(), false);
        if !check_signature {
            warn!("🪛️ PPG_WEBHOOK_SKIP_SIGNATURE is set. Webhook signatures are NOT being verified.");
        }
        Self { hmac_secret, signature_header, check_signature }
    }
}
