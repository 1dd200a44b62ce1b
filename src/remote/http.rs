//! HTTP implementation of [`StoreApi`] over the service's JSON API.

use crate::lifecycle::StoreConfig;
use crate::model::{CartLine, CartLineId, Medicine, MedicineId, NewMedicine};
use crate::remote::{StoreApi, StoreError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// reqwest-backed client for the inventory service.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: String,
    http: Client,
}

impl HttpStore {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:8080/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            text
        };
        warn!(status = status.as_u16(), %message, "Request rejected");
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl StoreApi for HttpStore {
    #[instrument(skip(self))]
    async fn list_medicines(&self) -> Result<Vec<Medicine>, StoreError> {
        debug!("Sending request");
        self.fetch(self.http.get(self.url("/medicines"))).await
    }

    #[instrument(skip(self))]
    async fn search_medicines(&self, term: &str) -> Result<Vec<Medicine>, StoreError> {
        debug!("Sending request");
        let request = self
            .http
            .get(self.url("/medicines/search"))
            .query(&[("name", term)]);
        self.fetch(request).await
    }

    #[instrument(skip(self))]
    async fn create_medicine(&self, medicine: NewMedicine) -> Result<Medicine, StoreError> {
        debug!("Sending request");
        let request = self.http.post(self.url("/medicines")).json(&medicine);
        self.fetch(request).await
    }

    #[instrument(skip(self))]
    async fn add_to_cart(
        &self,
        medicine_id: MedicineId,
        quantity: u32,
    ) -> Result<CartLine, StoreError> {
        debug!("Sending request");
        let request = self
            .http
            .post(self.url("/cart/add"))
            .query(&[("medicine_id", medicine_id.0), ("quantity", quantity)]);
        self.fetch(request).await
    }

    #[instrument(skip(self))]
    async fn list_cart_items(&self) -> Result<Vec<CartLine>, StoreError> {
        debug!("Sending request");
        self.fetch(self.http.get(self.url("/cart/items"))).await
    }

    #[instrument(skip(self))]
    async fn update_cart_item(
        &self,
        line_id: CartLineId,
        quantity: u32,
    ) -> Result<CartLine, StoreError> {
        debug!("Sending request");
        let request = self
            .http
            .put(self.url(&format!("/cart/update/{}", line_id.0)))
            .query(&[("quantity", quantity)]);
        self.fetch(request).await
    }

    #[instrument(skip(self))]
    async fn remove_cart_item(&self, line_id: CartLineId) -> Result<(), StoreError> {
        debug!("Sending request");
        let request = self
            .http
            .delete(self.url(&format!("/cart/remove/{}", line_id.0)));
        self.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<String, StoreError> {
        debug!("Sending request");
        let response = self.send(self.http.delete(self.url("/cart/clear"))).await?;
        let text = response.text().await?;
        Ok(parse_confirmation(&text))
    }
}

/// The clear endpoint answers with either a JSON string or bare text.
fn parse_confirmation(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_trailing_slash_from_base_url() {
        let store = HttpStore::new("http://localhost:8080/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.base_url(), "http://localhost:8080/api");
        assert_eq!(store.url("/cart/items"), "http://localhost:8080/api/cart/items");
    }

    #[test]
    fn test_parse_confirmation_accepts_json_and_text() {
        assert_eq!(parse_confirmation("\"Cart cleared\""), "Cart cleared");
        assert_eq!(parse_confirmation("Cart cleared\n"), "Cart cleared");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is not expected to serve HTTP on the loopback interface.
        let store = HttpStore::new("http://127.0.0.1:9/api", Duration::from_millis(500)).unwrap();
        let result = store.list_medicines().await;
        assert!(matches!(result, Err(StoreError::Network(_))), "{result:?}");
    }
}
