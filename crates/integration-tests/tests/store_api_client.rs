//! Integration tests for the HTTP store API client.
//!
//! Each test starts its own fake API on an ephemeral port.

use rocketshoes_cart::{ApiClient, ApiConfig, ApiError, StoreApi};
use rocketshoes_core::ProductId;
use rocketshoes_integration_tests::FakeStoreApi;
use secrecy::SecretString;

#[tokio::test]
async fn test_fetch_product_and_stock() {
    let server = FakeStoreApi::start().await;
    server
        .add_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 3)
        .await;
    let client = ApiClient::new(&server.api_config()).expect("client");

    let product = client.product(ProductId::new(1)).await.expect("product");
    assert_eq!(product.title(), Some("Tênis de Caminhada Leve Confortável"));
    assert_eq!(product.amount, 0);
    assert_eq!(product.unit_price().display(), "R$ 179,90");

    let stock = client.stock(ProductId::new(1)).await.expect("stock");
    assert_eq!(stock.id, ProductId::new(1));
    assert_eq!(stock.amount, 3);
}

#[tokio::test]
async fn test_products_are_cached_but_stock_is_not() {
    let server = FakeStoreApi::start().await;
    server.add_product(2, "Tênis VR Caminhada Confortável", 139.9, 5).await;
    let client = ApiClient::new(&server.api_config()).expect("client");

    for _ in 0..3 {
        client.product(ProductId::new(2)).await.expect("product");
        client.stock(ProductId::new(2)).await.expect("stock");
    }
    assert_eq!(server.product_requests(), 1);
    assert_eq!(server.stock_requests(), 3);

    server.set_stock(2, 0).await;
    assert_eq!(client.stock(ProductId::new(2)).await.expect("stock").amount, 0);

    client.invalidate_products();
    client.product(ProductId::new(2)).await.expect("product");
    assert_eq!(server.product_requests(), 2);
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let server = FakeStoreApi::start().await;
    let client = ApiClient::new(&server.api_config()).expect("client");

    let err = client.product(ProductId::new(99)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref path) if path == "/products/99"));

    let err = client.stock(ProductId::new(99)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let server = FakeStoreApi::start().await;
    server.rate_limit_product(3, 7).await;
    let client = ApiClient::new(&server.api_config()).expect("client");

    let err = client.product(ProductId::new(3)).await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited(7)));
}

#[tokio::test]
async fn test_server_error_and_bad_body() {
    let server = FakeStoreApi::start().await;
    server.fail_product(4).await;
    server.corrupt_product(5).await;
    let client = ApiClient::new(&server.api_config()).expect("client");

    let err = client.product(ProductId::new(4)).await.unwrap_err();
    assert!(
        matches!(err, ApiError::Status { status: 500, ref body } if body == "database offline")
    );

    let err = client.product(ProductId::new(5)).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_api_is_http_error() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let base_url = url::Url::parse(&format!("http://{addr}")).expect("url");
    let client = ApiClient::new(&ApiConfig::new(base_url)).expect("client");

    let err = client.stock(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = FakeStoreApi::start().await;
    server.add_product(4, "Tênis Nike Revolution", 199.9, 1).await;

    let anonymous = ApiClient::new(&server.api_config()).expect("client");
    anonymous.stock(ProductId::new(4)).await.expect("stock");
    assert_eq!(server.last_authorization().await, None);

    let mut config = server.api_config();
    config.token = Some(SecretString::from("k9$Qv2!mX7@pL4#wR8".to_string()));
    let client = ApiClient::new(&config).expect("client");
    client.stock(ProductId::new(4)).await.expect("stock");
    assert_eq!(
        server.last_authorization().await.as_deref(),
        Some("Bearer k9$Qv2!mX7@pL4#wR8")
    );
}
