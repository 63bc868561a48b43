//! # Catalog Query Engine
//!
//! Turns the current [`QuerySelection`] into the list the user sees.
//!
//! The engine keeps one candidate pool: the full product list, or one category's list
//! when a category is selected. Changing the selection refetches the pool only when the
//! category changes. Search filters the pool; sorting is applied last.
//!
//! A submitted non-blank query is recorded in search history once its pool is loaded.
//! History trouble never fails a search. If the pool cannot be fetched, the selection
//! still changes, the pool is empty, the error is returned and nothing is recorded.

use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::{DisplayMode, QuerySelection, SortMode};
use crate::catalog::{CatalogError, ProductRepository};
use crate::history::{HistoryClient, HistoryError};
use crate::model::{Category, Product, ProductId, ProductList};

pub const NO_RESULTS_MESSAGE: &str = "No products found";
pub const NO_PRODUCTS_MESSAGE: &str = "No products available";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

/// What to render for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    pub heading: String,
    /// Filtered and sorted.
    pub products: Vec<&'a Product>,
    /// Shown instead of the list when `products` is empty.
    pub empty_message: &'static str,
}

impl CatalogView<'_> {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

pub struct CatalogQueryEngine<R> {
    repository: R,
    history: HistoryClient,
    selection: QuerySelection,
    pool: ProductList,
    /// Which category `pool` was fetched for. `None` until a fetch succeeds.
    loaded: Option<Option<Category>>,
    categories: Vec<Category>,
    history_entries: Vec<String>,
}

impl<R: ProductRepository> CatalogQueryEngine<R> {
    pub fn new(repository: R, history: HistoryClient) -> Self {
        Self {
            repository,
            history,
            selection: QuerySelection::new(),
            pool: ProductList::from(Vec::new()),
            loaded: None,
            categories: Vec::new(),
            history_entries: Vec::new(),
        }
    }

    /// Loads search history, the category list and the full product list.
    ///
    /// Every step is attempted and each success applied; the first failure is returned.
    #[instrument(skip(self))]
    pub async fn open(&mut self) -> Result<(), QueryError> {
        let history = self.history.load().await;
        let categories = self.repository.list_categories().await;
        let pool = self.load_pool().await;

        let mut first_error = None;
        match history {
            Ok(entries) => self.history_entries = entries,
            Err(e) => {
                warn!(error = %e, "Failed to load search history");
                first_error.get_or_insert(QueryError::from(e));
            }
        }
        match categories {
            Ok(categories) => self.categories = categories,
            Err(e) => {
                first_error.get_or_insert(QueryError::from(e));
            }
        }
        if let Err(e) = pool {
            first_error.get_or_insert(e);
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Applies the search box text. Non-blank text is recorded in history.
    ///
    /// Only a failed product fetch is an error; a failed record is logged.
    #[instrument(skip(self))]
    pub async fn set_query(&mut self, text: &str) -> Result<(), QueryError> {
        self.selection = self.selection.with_query(text);
        self.load_pool().await?;

        if let Some(query) = self.selection.mode().query() {
            let matches = query.filter(&self.pool).len();
            debug!(query = %query, matches, "Search");
            match self.history.record(query.as_str()).await {
                Ok(entries) => self.history_entries = entries,
                Err(e) => warn!(query = %query, error = %e, "Failed to record search"),
            }
        }
        Ok(())
    }

    /// Selects `category`, or deselects it if already selected.
    #[instrument(skip(self))]
    pub async fn toggle_category(&mut self, category: Category) -> Result<(), QueryError> {
        self.selection = self.selection.toggle_category(category);
        self.load_pool().await
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.selection = self.selection.with_sort(sort);
    }

    /// Clears the category and sort order, keeping the query.
    #[instrument(skip(self))]
    pub async fn reset_filters(&mut self) -> Result<(), QueryError> {
        self.selection = self.selection.reset_filters();
        self.load_pool().await
    }

    #[instrument(skip(self))]
    pub async fn clear_history(&mut self) -> Result<(), QueryError> {
        self.history.clear().await?;
        self.history_entries.clear();
        Ok(())
    }

    /// Search history as of the last load, record or clear. Most recent first.
    pub fn history(&self) -> &[String] {
        &self.history_entries
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selection(&self) -> &QuerySelection {
        &self.selection
    }

    pub async fn product(&self, id: ProductId) -> Result<Product, QueryError> {
        Ok(self.repository.get_product(id).await?)
    }

    pub fn view(&self) -> CatalogView<'_> {
        let mode = self.selection.mode();
        let mut products: Vec<&Product> = match mode.query() {
            Some(query) => query.filter(&self.pool),
            None => self.pool.iter().collect(),
        };
        self.selection.sort().apply(&mut products);

        let (heading, empty_message) = match mode {
            DisplayMode::Search { .. } => (
                format!("Search Results ({})", products.len()),
                NO_RESULTS_MESSAGE,
            ),
            DisplayMode::Category(category) => {
                (format!("{} Products", category.label()), NO_PRODUCTS_MESSAGE)
            }
            DisplayMode::All => ("All Products".to_string(), NO_PRODUCTS_MESSAGE),
        };

        CatalogView {
            heading,
            products,
            empty_message,
        }
    }

    /// Makes `pool` hold the products for the selected category.
    async fn load_pool(&mut self) -> Result<(), QueryError> {
        let category = self.selection.mode().category();
        if self.loaded == Some(category) {
            return Ok(());
        }

        let fetched = match category {
            Some(category) => self.repository.list_products_by_category(category, None).await,
            None => self.repository.list_products(None).await,
        };
        match fetched {
            Ok(products) => {
                debug!(?category, count = products.len(), "Loaded candidate pool");
                self.pool = products;
                self.loaded = Some(category);
                Ok(())
            }
            Err(e) => {
                warn!(?category, error = %e, "Failed to load products");
                self.pool = ProductList::from(Vec::new());
                self.loaded = None;
                Err(e.into())
            }
        }
    }
}
