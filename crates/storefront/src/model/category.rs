//! The closed set of catalog categories.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::catalog::CatalogError;

/// A catalog category. Doubles as a filter key and a display grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "men's clothing")]
    MensClothing,
    #[serde(rename = "women's clothing")]
    WomensClothing,
    #[serde(rename = "jewelery")]
    Jewelery,
    #[serde(rename = "electronics")]
    Electronics,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::MensClothing,
        Category::WomensClothing,
        Category::Jewelery,
        Category::Electronics,
    ];

    /// Wire name, exactly as the catalog service spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::MensClothing => "men's clothing",
            Category::WomensClothing => "women's clothing",
            Category::Jewelery => "jewelery",
            Category::Electronics => "electronics",
        }
    }

    /// Display label with the first letter capitalised.
    pub fn label(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    /// Accepts wire names and the short filter names (`men`, `women`, `jewelry`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "men's clothing" | "men" => Ok(Category::MensClothing),
            "women's clothing" | "women" => Ok(Category::WomensClothing),
            "jewelery" | "jewelry" => Ok(Category::Jewelery),
            "electronics" => Ok(Category::Electronics),
            _ => Err(CatalogError::InvalidCategory(value.to_string())),
        }
    }
}
