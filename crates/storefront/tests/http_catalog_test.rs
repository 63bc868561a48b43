mod common;

use axum::http::StatusCode;
use storefront::catalog::{CatalogError, HttpCatalog, ProductRepository};
use storefront::config::CatalogConfig;
use storefront::model::{Category, ProductId};

use common::{catalog_router, failing_router, serve, Hits};

fn catalog(base_url: &str) -> HttpCatalog {
    HttpCatalog::new(&CatalogConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_list_products_honours_limit() {
    let base = serve(catalog_router(Hits::default())).await;
    let catalog = catalog(&base);

    assert_eq!(catalog.list_products(None).await.unwrap().len(), 7);
    assert_eq!(catalog.list_products(Some(3)).await.unwrap().len(), 3);
    // Zero means no cap.
    assert_eq!(catalog.list_products(Some(0)).await.unwrap().len(), 7);
}

#[tokio::test]
async fn test_category_with_apostrophe_and_space_reaches_the_service() {
    let base = serve(catalog_router(Hits::default())).await;
    let products = catalog(&base)
        .list_products_by_category(Category::MensClothing, None)
        .await
        .unwrap();

    let ids: Vec<u32> = products.iter().map(|p| p.id.0).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(products.iter().all(|p| p.category == Category::MensClothing));
}

#[tokio::test]
async fn test_get_product_decodes_all_fields() {
    let base = serve(catalog_router(Hits::default())).await;
    let product = catalog(&base).get_product(ProductId(3)).await.unwrap();

    assert_eq!(product.title, "John Hardy Gold Bracelet");
    assert_eq!(product.price, 695.0);
    assert_eq!(product.category, Category::Jewelery);
    assert_eq!(product.image, "https://img.test/3.jpg");
    assert_eq!(product.rating.rate, 4.6);
    assert_eq!(product.rating.count, 103);
}

#[tokio::test]
async fn test_empty_body_for_unknown_id_is_not_found() {
    let base = serve(catalog_router(Hits::default())).await;
    let err = catalog(&base).get_product(ProductId(999)).await.unwrap_err();
    assert_eq!(err, CatalogError::NotFound(ProductId(999)));
}

#[tokio::test]
async fn test_null_body_and_404_are_not_found() {
    let null_base = serve(failing_router(StatusCode::OK, "null")).await;
    let err = catalog(&null_base).get_product(ProductId(8)).await.unwrap_err();
    assert_eq!(err, CatalogError::NotFound(ProductId(8)));

    let missing_base = serve(failing_router(StatusCode::NOT_FOUND, "")).await;
    let err = catalog(&missing_base).get_product(ProductId(8)).await.unwrap_err();
    assert_eq!(err, CatalogError::NotFound(ProductId(8)));
}

#[tokio::test]
async fn test_server_error_is_service_error() {
    let base = serve(failing_router(StatusCode::INTERNAL_SERVER_ERROR, "boom")).await;
    let err = catalog(&base).list_products(None).await.unwrap_err();
    assert_eq!(
        err,
        CatalogError::Service {
            status: 500,
            reason: "Internal Server Error".to_string()
        }
    );
}

#[tokio::test]
async fn test_404_on_a_list_is_service_error() {
    let base = serve(failing_router(StatusCode::NOT_FOUND, "")).await;
    let err = catalog(&base).list_categories().await.unwrap_err();
    assert!(matches!(err, CatalogError::Service { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let base = serve(failing_router(StatusCode::OK, "{\"id\": \"not a list\"}")).await;
    let err = catalog(&base).list_products(None).await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}

#[tokio::test]
async fn test_unknown_categories_are_dropped() {
    let base = serve(catalog_router(Hits::default())).await;
    let categories = catalog(&base).list_categories().await.unwrap();
    assert_eq!(
        categories,
        vec![
            Category::Electronics,
            Category::Jewelery,
            Category::MensClothing,
            Category::WomensClothing
        ]
    );
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let base = serve(axum::Router::new().nest("/api", catalog_router(Hits::default()))).await;
    let categories = catalog(&format!("{base}/api")).list_categories().await.unwrap();
    assert_eq!(categories.len(), 4);
}
