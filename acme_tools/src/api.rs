use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::de::DeserializeOwned;

use crate::{config::AcmeConfig, data_objects::AcmeOrder, AcmeApiError};

#[derive(Clone)]
pub struct AcmeApi {
    config: AcmeConfig,
    client: Arc<Client>,
}

impl AcmeApi {
    pub fn new(config: AcmeConfig) -> Result<Self, AcmeApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.api_key.reveal().as_str())
            .map_err(|e| AcmeApiError::Initialization(e.to_string()))?;
        headers.insert("X-Acme-Api-Key", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AcmeApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Fetches the authoritative order record for the given external order id.
    pub async fn fetch_order(&self, external_order_id: &str) -> Result<AcmeOrder, AcmeApiError> {
        self.rest_query(Method::GET, &format!("/external-api/orders/{external_order_id}")).await
    }

    pub async fn rest_query<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, AcmeApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let response =
            self.client.request(method, url).send().await.map_err(|e| AcmeApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| AcmeApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| AcmeApiError::RestResponseError(e.to_string()))?;
            Err(AcmeApiError::QueryError { status, message })
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }
}
