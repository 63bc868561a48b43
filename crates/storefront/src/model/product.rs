//! Products as served by the catalog service.
//!
//! Products are immutable once fetched. Lists of them travel as [`ProductList`] so
//! that the response cache and the query engine share one allocation.
use serde::{Deserialize, Serialize};

use std::fmt::Display;
use std::sync::Arc;

use super::Category;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Average score and number of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: Category,
    /// Image URI.
    pub image: String,
    pub rating: Rating,
}

impl Product {
    /// The text free-text search runs against: title, category and description.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.category, self.description).to_lowercase()
    }
}

/// Shared, immutable list of products.
pub type ProductList = Arc<[Product]>;
