#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use storefront::model::{Category, Product, ProductId, Rating};

pub fn product(
    id: u32,
    title: &str,
    price: f64,
    category: Category,
    rate: f64,
    description: &str,
) -> Product {
    Product {
        id: ProductId(id),
        title: title.to_string(),
        price,
        description: description.to_string(),
        category,
        image: format!("https://img.test/{id}.jpg"),
        rating: Rating { rate, count: 100 + id },
    }
}

/// A small catalog covering every category.
pub fn products() -> Vec<Product> {
    vec![
        product(
            1,
            "Fjallraven Backpack",
            109.95,
            Category::MensClothing,
            3.9,
            "Your perfect pack for everyday use and walks in the forest",
        ),
        product(
            2,
            "Mens Casual Slim Fit T-Shirt",
            22.3,
            Category::MensClothing,
            4.1,
            "Slim-fitting style,
            contrast raglan long sleeve",
        ),
        product(
            3,
            "John Hardy Gold Bracelet",
            695.0,
            Category::Jewelery,
            4.6,
            "Inspired by the mythical water dragon",
        ),
        product(
            4,
            "WD 2TB External Hard Drive",
            64.0,
            Category::Electronics,
            3.3,
            "USB 3.0 and USB 2.0 compatibility,
            fast data transfers",
        ),
        product(
            5,
            "SanDisk SSD PLUS 1TB",
            109.0,
            Category::Electronics,
            2.9,
            "Easy upgrade for faster boot up,
            shutdown and file transfers",
        ),
        product(
            6,
            "Womens Rain Jacket",
            39.99,
            Category::WomensClothing,
            3.8,
            "Lightweight and slim,
            a hooded rain jacket for women",
        ),
        product(
            7,
            "White Gold Plated Princess Ring",
            9.99,
            Category::Jewelery,
            3.0,
            "Classic created wedding engagement solitaire diamond promise ring",
        ),
    ]
}

/// Request counter shared with a running fixture server.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

fn capped(products: Vec<Product>, limit: Option<usize>) -> Vec<Product> {
    match limit {
        Some(limit) => products.into_iter().take(limit).collect(),
        None => products,
    }
}

async fn list_products(
    State(hits): State<Hits>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<Product>> {
    hits.bump();
    Json(capped(products(), query.limit))
}

async fn list_by_category(
    State(hits): State<Hits>,
    Path(category): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<Product>> {
    hits.bump();
    let matching = products()
        .into_iter()
        .filter(|p| p.category.as_str() == category)
        .collect();
    Json(capped(matching, query.limit))
}

/// Unknown ids get `200` with an empty body, as the public service does.
async fn get_product(State(hits): State<Hits>, Path(id): Path<u32>) -> Response {
    hits.bump();
    match products().into_iter().find(|p| p.id == ProductId(id)) {
        Some(product) => Json(product).into_response(),
        None => (StatusCode::OK, "").into_response(),
    }
}

async fn list_categories(State(hits): State<Hits>) -> Json<Vec<&'static str>> {
    hits.bump();
    Json(vec!["electronics", "jewelery", "men's clothing", "women's clothing", "toys"])
}

/// Routes of the catalog service, backed by [`products`].
pub fn catalog_router(hits: Hits) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/categories", get(list_categories))
        .route("/products/category/{category}", get(list_by_category))
        .route("/products/{id}", get(get_product))
        .with_state(hits)
}

/// Every route answers with `status` and `body`.
pub fn failing_router(status: StatusCode, body: &'static str) -> Router {
    Router::new().fallback(move || async move { (status, body) })
}

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
