//! # Mock Catalog
//!
//! A scripted [`ProductRepository`] for tests. Each call pops the next expectation and
//! checks it was the call expected; replies come back in the order they were queued.
//!
//! ```rust
//! use storefront::catalog::mock::MockCatalog;
//! use storefront::catalog::{CatalogError, ProductRepository};
//! use storefront::model::{Category, ProductId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = MockCatalog::new();
//!     catalog.expect_categories().return_ok(vec![Category::Jewelery]);
//!     catalog
//!         .expect_product(ProductId(99))
//!         .return_err(CatalogError::NotFound(ProductId(99)));
//!
//!     assert_eq!(catalog.list_categories().await.unwrap(), vec![Category::Jewelery]);
//!     assert!(catalog.get_product(ProductId(99)).await.is_err());
//!     catalog.verify();
//! }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{CatalogError, ProductRepository};
use crate::model::{Category, Product, ProductId, ProductList};

/// One repository call, as the mock records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogCall {
    Products { limit: Option<u32> },
    CategoryProducts {
        category: Category,
        limit: Option<u32>,
    },
    Product(ProductId),
    Categories,
}

#[derive(Debug)]
enum Reply {
    Products(Result<ProductList, CatalogError>),
    Product(Result<Product, CatalogError>),
    Categories(Result<Vec<Category>, CatalogError>),
}

type Expectations = Arc<Mutex<VecDeque<(CatalogCall, Reply)>>>;

/// Scripted repository. Clones share the same script and call log.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    expectations: Expectations,
    calls: Arc<Mutex<Vec<CatalogCall>>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `list_products(limit)`.
    pub fn expect_products(&self, limit: Option<u32>) -> ListExpectationBuilder {
        ListExpectationBuilder {
            call: CatalogCall::Products { limit },
            expectations: self.expectations.clone(),
        }
    }

    /// Expect `list_products_by_category(category, limit)`.
    pub fn expect_category_products(
        &self,
        category: Category,
        limit: Option<u32>,
    ) -> ListExpectationBuilder {
        ListExpectationBuilder {
            call: CatalogCall::CategoryProducts { category, limit },
            expectations: self.expectations.clone(),
        }
    }

    /// Expect `get_product(id)`.
    pub fn expect_product(&self, id: ProductId) -> ProductExpectationBuilder {
        ProductExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expect `list_categories()`.
    pub fn expect_categories(&self) -> CategoriesExpectationBuilder {
        CategoriesExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Panics if any queued expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all catalog expectations were met. {} remaining", remaining);
        }
    }

    fn next(&self, call: CatalogCall) -> Reply {
        self.calls.lock().unwrap().push(call);
        let next = self.expectations.lock().unwrap().pop_front();
        match next {
            Some((expected, reply)) if expected == call => reply,
            Some((expected, _)) => {
                panic!("Unexpected catalog call: {:?}, expected {:?}", call, expected)
            }
            None => panic!("Unexpected catalog call: {:?}", call),
        }
    }

    fn next_list(&self, call: CatalogCall) -> Result<ProductList, CatalogError> {
        match self.next(call) {
            Reply::Products(result) => result,
            other => panic!("Scripted reply {:?} does not fit {:?}", other, call),
        }
    }
}

/// Completes a list expectation.
pub struct ListExpectationBuilder {
    call: CatalogCall,
    expectations: Expectations,
}

impl ListExpectationBuilder {
    pub fn return_ok(self, products: impl Into<ProductList>) {
        self.push(Ok(products.into()));
    }

    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, result: Result<ProductList, CatalogError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.call, Reply::Products(result)));
    }
}

/// Completes a single-product expectation.
pub struct ProductExpectationBuilder {
    id: ProductId,
    expectations: Expectations,
}

impl ProductExpectationBuilder {
    pub fn return_ok(self, product: Product) {
        self.push(Ok(product));
    }

    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, result: Result<Product, CatalogError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((CatalogCall::Product(self.id), Reply::Product(result)));
    }
}

/// Completes a categories expectation.
pub struct CategoriesExpectationBuilder {
    expectations: Expectations,
}

impl CategoriesExpectationBuilder {
    pub fn return_ok(self, categories: Vec<Category>) {
        self.push(Ok(categories));
    }

    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, result: Result<Vec<Category>, CatalogError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((CatalogCall::Categories, Reply::Categories(result)));
    }
}

#[async_trait]
impl ProductRepository for MockCatalog {
    async fn list_products(&self, limit: Option<u32>) -> Result<ProductList, CatalogError> {
        self.next_list(CatalogCall::Products { limit })
    }

    async fn list_products_by_category(
        &self,
        category: Category,
        limit: Option<u32>,
    ) -> Result<ProductList, CatalogError> {
        self.next_list(CatalogCall::CategoryProducts { category, limit })
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let call = CatalogCall::Product(id);
        match self.next(call) {
            Reply::Product(result) => result,
            other => panic!("Scripted reply {:?} does not fit {:?}", other, call),
        }
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let call = CatalogCall::Categories;
        match self.next(call) {
            Reply::Categories(result) => result,
            other => panic!("Scripted reply {:?} does not fit {:?}", other, call),
        }
    }
}
