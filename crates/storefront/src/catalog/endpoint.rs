//! Catalog service routes.

use reqwest::Url;

use super::CatalogError;
use crate::model::{Category, ProductId};

/// One route of the catalog service, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /products?limit={n}`
    Products { limit: Option<u32> },
    /// `GET /products/category/{category}?limit={n}`
    CategoryProducts {
        category: Category,
        limit: Option<u32>,
    },
    /// `GET /products/{id}`
    Product(ProductId),
    /// `GET /products/categories`
    Categories,
}

impl Endpoint {
    /// Resolves this route against `base`, keeping any path prefix `base` already has.
    ///
    /// Path segments are percent-encoded. A zero limit is dropped like a missing one.
    pub fn url(&self, base: &Url) -> Result<Url, CatalogError> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CatalogError::Client(format!("base URL cannot have a path: {base}")))?;
            segments.pop_if_empty().push("products");
            match self {
                Endpoint::Products { .. } => {}
                Endpoint::CategoryProducts { category, .. } => {
                    segments.push("category").push(category.as_str());
                }
                Endpoint::Product(id) => {
                    segments.push(&id.to_string());
                }
                Endpoint::Categories => {
                    segments.push("categories");
                }
            }
        }

        match self.limit() {
            Some(limit) => {
                url.query_pairs_mut().clear().append_pair("limit", &limit.to_string());
            }
            None => url.set_query(None),
        }
        Ok(url)
    }

    fn limit(&self) -> Option<u32> {
        match self {
            Endpoint::Products { limit } | Endpoint::CategoryProducts { limit, .. } => {
                limit.filter(|n| *n > 0)
            }
            Endpoint::Product(_) | Endpoint::Categories => None,
        }
    }
}
