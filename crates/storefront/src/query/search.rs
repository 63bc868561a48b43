//! Free-text product search.

use std::fmt::Display;

use crate::model::Product;

/// A non-blank search query.
///
/// Matching is case-insensitive: every whitespace-separated token must occur as a
/// substring of the product's searchable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    tokens: Vec<String>,
}

impl SearchQuery {
    /// Returns `None` for empty or whitespace-only text.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text.trim();
        let tokens: Vec<String> = raw.to_lowercase().split_whitespace().map(String::from).collect();
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    /// The query as typed, trimmed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn matches(&self, product: &Product) -> bool {
        let text = product.searchable_text();
        self.tokens.iter().all(|token| text.contains(token.as_str()))
    }

    /// Matching products from `pool`, in pool order.
    pub fn filter<'a>(&self, pool: &'a [Product]) -> Vec<&'a Product> {
        pool.iter().filter(|p| self.matches(p)).collect()
    }
}

impl Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
