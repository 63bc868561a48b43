//! # HTTP Catalog
//!
//! [`ProductRepository`] over the catalog service's REST routes using `reqwest`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::{CatalogError, Endpoint, ProductRepository};
use crate::config::CatalogConfig;
use crate::model::{Category, Product, ProductId, ProductList};

/// Catalog service client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Builds a client for `config.base_url` with the configured request timeout.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            CatalogError::Client(format!("invalid base URL {}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Client(format!(
                "base URL cannot have a path: {base_url}"
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Client(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issues one GET and decodes the body.
    ///
    /// `Ok(None)` means the service answered with an empty or `null` body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<Option<T>, CatalogError> {
        let url = endpoint.url(&self.base_url)?;
        let started = Instant::now();

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Catalog request failed");
            CatalogError::Network(e.to_string())
        })?;

        let status = response.status();
        let duration_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), duration_ms, "Catalog service error");
            return Err(match (endpoint, status) {
                (Endpoint::Product(id), StatusCode::NOT_FOUND) => CatalogError::NotFound(id),
                _ => CatalogError::Service {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                },
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        debug!(
            url = %url,
            status = status.as_u16(),
            duration_ms,
            bytes = body.len(),
            "Catalog response"
        );

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }
        serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }

    async fn fetch_list(&self, endpoint: Endpoint) -> Result<ProductList, CatalogError> {
        let products: Vec<Product> = self
            .fetch(endpoint)
            .await?
            .ok_or_else(|| CatalogError::Decode("empty response body".to_string()))?;
        debug!(count = products.len(), "Decoded products");
        Ok(products.into())
    }
}

#[async_trait]
impl ProductRepository for HttpCatalog {
    #[instrument(skip(self))]
    async fn list_products(&self, limit: Option<u32>) -> Result<ProductList, CatalogError> {
        self.fetch_list(Endpoint::Products { limit }).await
    }

    #[instrument(skip(self))]
    async fn list_products_by_category(
        &self,
        category: Category,
        limit: Option<u32>,
    ) -> Result<ProductList, CatalogError> {
        self.fetch_list(Endpoint::CategoryProducts { category, limit })
            .await
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch(Endpoint::Product(id))
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let names: Vec<String> = self
            .fetch(Endpoint::Categories)
            .await?
            .ok_or_else(|| CatalogError::Decode("empty response body".to_string()))?;

        let categories = names
            .iter()
            .filter_map(|name| match name.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    debug!(name = %name, "Skipping unknown category");
                    None
                }
            })
            .collect();
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> CatalogConfig {
        CatalogConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_new_accepts_http_base() {
        let catalog = HttpCatalog::new(&config("http://127.0.0.1:9/api")).unwrap();
        assert_eq!(catalog.base_url().as_str(), "http://127.0.0.1:9/api");
    }

    #[test]
    fn test_new_rejects_bad_base() {
        assert!(matches!(
            HttpCatalog::new(&config("not a url")),
            Err(CatalogError::Client(_))
        ));
        assert!(matches!(
            HttpCatalog::new(&config("mailto:shop@example.com")),
            Err(CatalogError::Client(_))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let catalog = HttpCatalog::new(&config(&format!("http://{addr}"))).unwrap();
        let err = catalog.list_products(None).await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }
}
