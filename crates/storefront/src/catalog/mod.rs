//! # Catalog Access
//!
//! The [`ProductRepository`] trait is the seam between the storefront and the remote
//! catalog service. [`HttpCatalog`] is the production implementation;
//! [`CachedCatalog`](crate::cache::CachedCatalog) wraps any implementation with the
//! response cache; [`mock::MockCatalog`] scripts responses for tests.
//!
//! Every operation is a single request with no retry. A failure is terminal for that
//! request and is returned to the caller unchanged.

pub mod endpoint;
pub mod error;
pub mod featured;
pub mod http;
pub mod mock;

pub use endpoint::Endpoint;
pub use error::*;
pub use http::HttpCatalog;

use crate::model::{Category, Product, ProductId, ProductList};
use async_trait::async_trait;

/// Read-only access to the product catalog.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Up to `limit` products in catalog order. `None` (or `Some(0)`) means no cap.
    async fn list_products(&self, limit: Option<u32>) -> Result<ProductList, CatalogError>;

    /// Same contract as [`ProductRepository::list_products`], scoped to one category.
    async fn list_products_by_category(
        &self,
        category: Category,
        limit: Option<u32>,
    ) -> Result<ProductList, CatalogError>;

    /// A single product. Fails with [`CatalogError::NotFound`] for unknown ids.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Category names known to the service, restricted to the closed [`Category`] set.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;
}
