//! # Search, Filter and Sort
//!
//! Pure pieces ([`SearchQuery`], [`SortMode`], [`QuerySelection`]) plus the
//! [`CatalogQueryEngine`] that drives them against a repository and search history.

pub mod engine;
pub mod search;
pub mod selection;
pub mod sort;

pub use engine::{CatalogQueryEngine, CatalogView, QueryError};
pub use search::SearchQuery;
pub use selection::{DisplayMode, QuerySelection};
pub use sort::{SortMode, UnknownSortMode};
