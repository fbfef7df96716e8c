//! PayPal capture verification.
//!
//! The storefront captures the payment in the browser via the PayPal JS SDK and then submits the checkout with the
//! PayPal order id. Before persisting anything, the server fetches that order from the PayPal Orders API and checks
//! that it was actually captured (`COMPLETED`) and that the captured amount covers the calculated price. Without
//! configured credentials the check is skipped; that mode exists for development only.
use std::sync::Arc;

use log::*;
use ppg_common::{UsdAmount, USD_CURRENCY_CODE};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::{config::PayPalConfig, errors::ServerError};

#[derive(Debug, Error)]
pub enum PayPalError {
    #[error("Could not reach PayPal. {0}")]
    RequestError(String),
    #[error("PayPal returned an error. {status}: {message}")]
    ResponseError { status: u16, message: String },
    #[error("Could not parse the PayPal response. {0}")]
    JsonError(String),
    #[error("Payment not captured. {0}")]
    NotCaptured(String),
}

impl From<reqwest::Error> for PayPalError {
    fn from(e: reqwest::Error) -> Self {
        Self::RequestError(e.to_string())
    }
}

impl From<PayPalError> for ServerError {
    fn from(e: PayPalError) -> Self {
        match e {
            PayPalError::NotCaptured(m) => Self::PaymentNotCaptured(m),
            PayPalError::ResponseError { .. } => Self::PaymentNotCaptured(e.to_string()),
            e => Self::BackendError(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AccessToken {
    access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayPalOrder {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub purchase_units: Vec<PurchaseUnit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseUnit {
    pub amount: Amount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Amount {
    pub currency_code: String,
    /// Decimal string, e.g. "129.00".
    pub value: String,
}

#[derive(Clone)]
pub struct PayPalApi {
    config: PayPalConfig,
    client: Arc<Client>,
}

impl PayPalApi {
    pub fn new(config: PayPalConfig) -> Self {
        Self { config, client: Arc::new(Client::new()) }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Confirms that the given PayPal order was captured for at least `expected`.
    ///
    /// Skipped with a warning when no credentials are configured. A missing order id, a non-`COMPLETED` status, a
    /// non-USD currency or a short amount all fail the check.
    pub async fn confirm_capture(&self, paypal_order_id: Option<&str>, expected: UsdAmount) -> Result<(), PayPalError> {
        if !self.is_configured() {
            warn!("💳️ PayPal is not configured. Accepting the order without verifying the capture.");
            return Ok(());
        }
        let order_id = paypal_order_id
            .ok_or_else(|| PayPalError::NotCaptured("No PayPal order id was supplied with the checkout.".into()))?;
        let order = self.get_order(order_id).await?;
        if order.status != "COMPLETED" {
            return Err(PayPalError::NotCaptured(format!(
                "PayPal order {} has status {}, expected COMPLETED.",
                order.id, order.status
            )));
        }
        let captured = order
            .purchase_units
            .iter()
            .filter(|u| u.amount.currency_code == USD_CURRENCY_CODE)
            .filter_map(|u| parse_paypal_amount(&u.amount.value))
            .sum::<UsdAmount>();
        if captured < expected {
            return Err(PayPalError::NotCaptured(format!(
                "PayPal order {} captured {captured}, but the order price is {expected}.",
                order.id
            )));
        }
        debug!("💳️ PayPal order {} verified: captured {captured} against a price of {expected}.", order.id);
        Ok(())
    }

    pub async fn get_order(&self, order_id: &str) -> Result<PayPalOrder, PayPalError> {
        let token = self.fetch_access_token().await?;
        let url = format!("{}/v2/checkout/orders/{order_id}", self.config.api_url);
        let response = self.client.get(&url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(PayPalError::ResponseError { status, message });
        }
        let order = response.json::<PayPalOrder>().await.map_err(|e| PayPalError::JsonError(e.to_string()))?;
        Ok(order)
    }

    async fn fetch_access_token(&self) -> Result<String, PayPalError> {
        let url = format!("{}/v1/oauth2/token", self.config.api_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.client_id, Some(self.config.secret.reveal()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(PayPalError::ResponseError { status, message });
        }
        let token = response.json::<AccessToken>().await.map_err(|e| PayPalError::JsonError(e.to_string()))?;
        Ok(token.access_token)
    }
}

/// PayPal amounts are decimal strings with up to two fraction digits.
fn parse_paypal_amount(value: &str) -> Option<UsdAmount> {
    let (dollars, cents) = match value.split_once('.') {
        Some((d, c)) => (d, c),
        None => (value, "0"),
    };
    let dollars = dollars.parse::<i64>().ok()?;
    let cents = format!("{cents:0<2}").get(..2)?.parse::<i64>().ok()?;
    Some(UsdAmount::from_cents(dollars * 100 + cents))
}
