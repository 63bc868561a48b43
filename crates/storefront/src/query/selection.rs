//! What the user has asked to see.
//!
//! [`QuerySelection`] is a value: every transition returns a new selection and leaves
//! the old one untouched. The engine decides when to fetch and record.

use super::{SearchQuery, SortMode};
use crate::model::Category;

/// The single mode that determines the displayed list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    All,
    Category(Category),
    /// Free-text search, optionally scoped to one category's products.
    Search {
        query: SearchQuery,
        scope: Option<Category>,
    },
}

impl DisplayMode {
    /// The selected category, whether filtering directly or scoping a search.
    pub fn category(&self) -> Option<Category> {
        match self {
            DisplayMode::All => None,
            DisplayMode::Category(category) => Some(*category),
            DisplayMode::Search { scope, .. } => *scope,
        }
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        match self {
            DisplayMode::Search { query, .. } => Some(query),
            _ => None,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, DisplayMode::Search { .. })
    }
}

/// Display mode plus sort order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySelection {
    mode: DisplayMode,
    sort: SortMode,
}

impl QuerySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &DisplayMode {
        &self.mode
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Non-blank text searches within the current category; blank text leaves search.
    pub fn with_query(&self, text: &str) -> Self {
        let category = self.mode.category();
        let mode = match SearchQuery::parse(text) {
            Some(query) => DisplayMode::Search {
                query,
                scope: category,
            },
            None => Self::browse(category),
        };
        Self { mode, sort: self.sort }
    }

    /// Selects `category`, or deselects it if it is already selected. A search stays a
    /// search with the new scope.
    pub fn toggle_category(&self, category: Category) -> Self {
        let next = match self.mode.category() {
            Some(current) if current == category => None,
            _ => Some(category),
        };
        Self {
            mode: self.with_category(next),
            sort: self.sort,
        }
    }

    pub fn with_sort(&self, sort: SortMode) -> Self {
        Self {
            mode: self.mode.clone(),
            sort,
        }
    }

    /// Drops the category and the sort order. Any query is kept.
    pub fn reset_filters(&self) -> Self {
        Self {
            mode: self.with_category(None),
            sort: SortMode::Default,
        }
    }

    fn with_category(&self, category: Option<Category>) -> DisplayMode {
        match &self.mode {
            DisplayMode::Search { query, .. } => DisplayMode::Search {
                query: query.clone(),
                scope: category,
            },
            _ => Self::browse(category),
        }
    }

    fn browse(category: Option<Category>) -> DisplayMode {
        match category {
            Some(category) => DisplayMode::Category(category),
            None => DisplayMode::All,
        }
    }
}
