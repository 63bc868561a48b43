//! Result ordering.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::model::Product;

/// How the displayed list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Source order.
    #[default]
    Default,
    /// Descending rating.
    HighestRated,
    /// Ascending price.
    LowestPrice,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown sort mode: {0} (expected default, rating or price)")]
pub struct UnknownSortMode(pub String);

impl SortMode {
    /// Sorts in place. The sort is stable, so ties keep their prior order.
    pub fn apply(self, products: &mut [&Product]) {
        match self {
            SortMode::Default => {}
            SortMode::HighestRated => {
                products.sort_by(|a, b| b.rating.rate.total_cmp(&a.rating.rate));
            }
            SortMode::LowestPrice => {
                products.sort_by(|a, b| a.price.total_cmp(&b.price));
            }
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortMode::Default => "default",
            SortMode::HighestRated => "rating",
            SortMode::LowestPrice => "price",
        })
    }
}

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "default" | "none" => Ok(SortMode::Default),
            "rating" | "highest-rated" | "highestrated" => Ok(SortMode::HighestRated),
            "price" | "lowest-price" | "lowestprice" => Ok(SortMode::LowestPrice),
            _ => Err(UnknownSortMode(value.to_string())),
        }
    }
}
