use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::GelatoConfig,
    data_objects::{GelatoOrderRequest, GelatoOrderResponse, GelatoProduct, ShipmentMethodsResponse, ShippingMethod},
    GelatoApiError,
};

#[derive(Clone)]
pub struct GelatoApi {
    config: GelatoConfig,
    client: Arc<Client>,
}

impl GelatoApi {
    pub fn new(config: GelatoConfig) -> Result<Self, GelatoApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.api_key.reveal().as_str())
            .map_err(|e| GelatoApiError::Initialization(e.to_string()))?;
        headers.insert("X-API-KEY", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GelatoApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: String,
        params: &[(&str, &str)],
        body: Option<B>,
    ) -> Result<T, GelatoApiError> {
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| GelatoApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| GelatoApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| GelatoApiError::RestResponseError(e.to_string()))?;
            Err(GelatoApiError::QueryError { status, message })
        }
    }

    fn order_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.order_api_url)
    }

    /// Submit a print order. Gelato assigns its own order id and echoes back our `orderReferenceId`.
    pub async fn create_order(&self, order: GelatoOrderRequest) -> Result<GelatoOrderResponse, GelatoApiError> {
        debug!("Submitting print order [{}]", order.order_reference_id);
        let result = self
            .rest_query::<GelatoOrderResponse, GelatoOrderRequest>(
                Method::POST,
                self.order_url("/orders"),
                &[],
                Some(order),
            )
            .await?;
        info!("Print order submitted. Gelato id: {}. Status: {}", result.id, result.fulfillment_status);
        Ok(result)
    }

    pub async fn get_order(&self, gelato_order_id: &str) -> Result<GelatoOrderResponse, GelatoApiError> {
        debug!("Fetching print order {gelato_order_id}");
        let url = self.order_url(&format!("/orders/{gelato_order_id}"));
        self.rest_query::<GelatoOrderResponse, ()>(Method::GET, url, &[], None).await
    }

    pub async fn cancel_order(&self, gelato_order_id: &str) -> Result<(), GelatoApiError> {
        debug!("Cancelling print order {gelato_order_id}");
        let url = self.order_url(&format!("/orders/{gelato_order_id}:cancel"));
        self.rest_query::<serde_json::Value, ()>(Method::POST, url, &[], None).await?;
        info!("Cancelled print order {gelato_order_id}");
        Ok(())
    }

    /// Fetch the shipping methods available for the given ISO country code, or all methods if no country is given.
    pub async fn shipping_methods(&self, country: Option<&str>) -> Result<Vec<ShippingMethod>, GelatoApiError> {
        let url = format!("{}/shipment-methods", self.config.shipment_api_url);
        let params = match country {
            Some(c) => vec![("country", c)],
            None => vec![],
        };
        debug!("Fetching shipping methods for {}", country.unwrap_or("all countries"));
        let result = self.rest_query::<ShipmentMethodsResponse, ()>(Method::GET, url, &params, None).await?;
        debug!("Fetched {} shipping methods", result.shipment_methods.len());
        Ok(result.shipment_methods)
    }

    /// Look up a catalog product by its UID. Useful for validating the product-mapping table against the live catalog.
    pub async fn get_product(&self, product_uid: &str) -> Result<GelatoProduct, GelatoApiError> {
        let url = format!("{}/products/{product_uid}", self.config.product_api_url);
        debug!("Fetching catalog product {product_uid}");
        self.rest_query::<GelatoProduct, ()>(Method::GET, url, &[], None).await
    }
}
