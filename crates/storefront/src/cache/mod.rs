//! # Response Cache
//!
//! [`CachedCatalog`] puts a [`ResponseCache`] actor in front of any
//! [`ProductRepository`]. Fresh entries are served without a request; misses and stale
//! entries go to the inner repository and successful responses are stored. Errors are
//! never stored.
//!
//! The cache is an optimisation only. If its actor is gone, requests go straight to
//! the inner repository.
//!
//! Two overlapping requests for the same key both reach the inner repository; only
//! requests made after the first response is stored are absorbed.

pub mod client;
pub mod state;

pub use client::{CacheClient, CacheError};
pub use state::{CacheCommand, CacheReply, CachedValue, QueryKey, ResponseCache};

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use storefront_actor::StateActor;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::catalog::{CatalogError, ProductRepository};
use crate::config::CacheConfig;
use crate::model::{Category, Product, ProductId, ProductList};

/// Spawns the cache actor.
pub fn spawn(config: &CacheConfig) -> (CacheClient, JoinHandle<()>) {
    let state = ResponseCache::new(Duration::from_secs(config.ttl_secs), config.max_entries);
    let (actor, client) = StateActor::new(state, config.buffer_size);
    let handle = tokio::spawn(actor.run(()));
    (CacheClient::new(client), handle)
}

/// Response types that can live in the cache.
trait Cacheable: Sized + Send {
    fn from_cached(value: CachedValue) -> Option<Self>;
    fn to_cached(&self) -> CachedValue;
}

impl Cacheable for ProductList {
    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Products(products) => Some(products),
            _ => None,
        }
    }

    fn to_cached(&self) -> CachedValue {
        // Arc clone; the products themselves are shared.
        CachedValue::Products(self.clone())
    }
}

impl Cacheable for Product {
    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Product(product) => Some(product),
            _ => None,
        }
    }

    fn to_cached(&self) -> CachedValue {
        CachedValue::Product(self.clone())
    }
}

impl Cacheable for Vec<Category> {
    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Categories(categories) => Some(categories),
            _ => None,
        }
    }

    fn to_cached(&self) -> CachedValue {
        CachedValue::Categories(self.clone())
    }
}

/// A [`ProductRepository`] that consults the response cache first.
#[derive(Clone)]
pub struct CachedCatalog<R> {
    inner: R,
    cache: CacheClient,
}

impl<R: ProductRepository> CachedCatalog<R> {
    pub fn new(inner: R, cache: CacheClient) -> Self {
        Self { inner, cache }
    }

    async fn through<T, F>(&self, key: QueryKey, fetch: F) -> Result<T, CatalogError>
    where
        T: Cacheable,
        F: Future<Output = Result<T, CatalogError>> + Send,
    {
        match self.cache.lookup(key).await {
            Ok(Some(value)) => match T::from_cached(value) {
                Some(hit) => {
                    debug!(?key, "Cache hit");
                    return Ok(hit);
                }
                None => warn!(?key, "Cached value has the wrong shape"),
            },
            Ok(None) => debug!(?key, "Cache miss"),
            Err(e) => warn!(?key, error = %e, "Cache unavailable, fetching directly"),
        }

        let fetched = fetch.await?;
        if let Err(e) = self.cache.store(key, fetched.to_cached()).await {
            warn!(?key, error = %e, "Failed to cache response");
        }
        Ok(fetched)
    }
}

#[async_trait]
impl<R: ProductRepository> ProductRepository for CachedCatalog<R> {
    async fn list_products(&self, limit: Option<u32>) -> Result<ProductList, CatalogError> {
        self.through(QueryKey::products(limit), self.inner.list_products(limit))
            .await
    }

    async fn list_products_by_category(
        &self,
        category: Category,
        limit: Option<u32>,
    ) -> Result<ProductList, CatalogError> {
        self.through(
            QueryKey::category_products(category, limit),
            self.inner.list_products_by_category(category, limit),
        )
        .await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.through(QueryKey::Product(id), self.inner.get_product(id))
            .await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.through(QueryKey::Categories, self.inner.list_categories())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::{CatalogCall, MockCatalog};
    use crate::model::Rating;

    fn config(ttl_secs: u64) -> CacheConfig {
        CacheConfig {
            ttl_secs,
            max_entries: 16,
            buffer_size: 8,
        }
    }

    fn backpack() -> Product {
        Product {
            id: ProductId(1),
            title: "Fjallraven Backpack".to_string(),
            price: 109.95,
            description: "Fits 15 inch laptops".to_string(),
            category: Category::MensClothing,
            image: String::new(),
            rating: Rating { rate: 3.9, count: 120 },
        }
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let mock = MockCatalog::new();
        mock.expect_products(None).return_ok(vec![backpack()]);
        let (cache, _handle) = spawn(&config(300));
        let catalog = CachedCatalog::new(mock.clone(), cache);

        let first = catalog.list_products(None).await.unwrap();
        let second = catalog.list_products(Some(0)).await.unwrap();

        assert_eq!(first, second);
        mock.verify();
        assert_eq!(mock.calls(), vec![CatalogCall::Products { limit: None }]);
    }

    #[tokio::test]
    async fn test_stale_entries_are_refetched() {
        let mock = MockCatalog::new();
        mock.expect_product(ProductId(1)).return_ok(backpack());
        mock.expect_product(ProductId(1)).return_ok(backpack());
        let (cache, _handle) = spawn(&config(0));
        let catalog = CachedCatalog::new(mock.clone(), cache);

        catalog.get_product(ProductId(1)).await.unwrap();
        catalog.get_product(ProductId(1)).await.unwrap();
        mock.verify();
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let mock = MockCatalog::new();
        mock.expect_categories()
            .return_err(CatalogError::Network("timed out".to_string()));
        mock.expect_categories().return_ok(vec![Category::Jewelery]);
        let (cache, _handle) = spawn(&config(300));
        let catalog = CachedCatalog::new(mock.clone(), cache);

        assert!(catalog.list_categories().await.is_err());
        assert_eq!(catalog.list_categories().await.unwrap(), vec![Category::Jewelery]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_keys_keep_limits_and_categories_apart() {
        let mock = MockCatalog::new();
        mock.expect_products(Some(2)).return_ok(vec![backpack()]);
        mock.expect_products(None).return_ok(vec![backpack(), backpack()]);
        mock.expect_category_products(Category::MensClothing, None)
            .return_ok(vec![backpack()]);
        let (cache, _handle) = spawn(&config(300));
        let catalog = CachedCatalog::new(mock.clone(), cache);

        assert_eq!(catalog.list_products(Some(2)).await.unwrap().len(), 1);
        assert_eq!(catalog.list_products(None).await.unwrap().len(), 2);
        assert_eq!(
            catalog
                .list_products_by_category(Category::MensClothing, None)
                .await
                .unwrap()
                .len(),
            1
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_falls_back_to_inner_when_cache_is_gone() {
        let mock = MockCatalog::new();
        mock.expect_categories().return_ok(vec![Category::Electronics]);

        let (client, receiver) = storefront_actor::mock::create_mock_client::<ResponseCache>(1);
        drop(receiver);
        let catalog = CachedCatalog::new(mock.clone(), CacheClient::new(client));

        assert_eq!(catalog.list_categories().await.unwrap(), vec![Category::Electronics]);
        mock.verify();
    }
}
