//! Integration test support for the RocketShoes cart.
//!
//! [`FakeStoreApi`] serves the two endpoints the cart reads, backed by
//! in-memory tables, on an ephemeral local port. Request counters let tests
//! check what the client cached.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rocketshoes_cart::ApiConfig;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use url::Url;

/// How the fake API answers for a given product.
#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    RateLimited(u64),
    ServerError,
    Garbage,
}

#[derive(Default)]
struct Tables {
    products: RwLock<HashMap<i32, Reply>>,
    stock: RwLock<HashMap<i32, u32>>,
    last_authorization: RwLock<Option<String>>,
    product_requests: AtomicUsize,
    stock_requests: AtomicUsize,
}

/// A running fake store API.
pub struct FakeStoreApi {
    addr: SocketAddr,
    tables: Arc<Tables>,
}

impl FakeStoreApi {
    /// Bind to `127.0.0.1:0` and start serving in the background.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let tables = Arc::new(Tables::default());

        let app = Router::new()
            .route("/products/{id}", get(product))
            .route("/stock/{id}", get(stock))
            .with_state(Arc::clone(&tables));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake store API");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fake store API stopped");
        });

        Self { addr, tables }
    }

    /// Base URL of the fake API.
    ///
    /// # Panics
    ///
    /// Never in practice; the address is always a valid URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Invalid fake API URL")
    }

    /// Client configuration pointing at this server.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.base_url())
    }

    /// Publish a catalog product and its stock level.
    pub async fn add_product(&self, id: i32, title: &str, price: f64, stock: u32) {
        let body = json!({
            "id": id,
            "title": title,
            "price": price,
            "image": format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"),
        });
        self.publish_product(id, body, stock).await;
    }

    /// Publish an arbitrary catalog body for `id` and its stock level.
    pub async fn publish_product(&self, id: i32, body: Value, stock: u32) {
        self.tables
            .products
            .write()
            .await
            .insert(id, Reply::Json(body));
        self.set_stock(id, stock).await;
    }

    /// Change a product's stock level.
    pub async fn set_stock(&self, id: i32, amount: u32) {
        self.tables.stock.write().await.insert(id, amount);
    }

    /// Answer product requests for `id` with 429 and a `Retry-After`.
    pub async fn rate_limit_product(&self, id: i32, retry_after: u64) {
        self.tables
            .products
            .write()
            .await
            .insert(id, Reply::RateLimited(retry_after));
    }

    /// Answer product requests for `id` with a 500.
    pub async fn fail_product(&self, id: i32) {
        self.tables
            .products
            .write()
            .await
            .insert(id, Reply::ServerError);
    }

    /// Answer product requests for `id` with a body that is not JSON.
    pub async fn corrupt_product(&self, id: i32) {
        self.tables.products.write().await.insert(id, Reply::Garbage);
    }

    /// Product requests served so far.
    #[must_use]
    pub fn product_requests(&self) -> usize {
        self.tables.product_requests.load(Ordering::SeqCst)
    }

    /// Stock requests served so far.
    #[must_use]
    pub fn stock_requests(&self) -> usize {
        self.tables.stock_requests.load(Ordering::SeqCst)
    }

    /// `Authorization` header of the most recent stock request.
    pub async fn last_authorization(&self) -> Option<String> {
        self.tables.last_authorization.read().await.clone()
    }
}

async fn product(State(tables): State<Arc<Tables>>, Path(id): Path<i32>) -> Response {
    tables.product_requests.fetch_add(1, Ordering::SeqCst);

    match tables.products.read().await.get(&id).cloned() {
        Some(Reply::Json(body)) => Json(body).into_response(),
        Some(Reply::RateLimited(retry_after)) => {
            let mut response = StatusCode::TOO_MANY_REQUESTS.into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
        Some(Reply::ServerError) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "database offline").into_response()
        }
        Some(Reply::Garbage) => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn stock(
    State(tables): State<Arc<Tables>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    tables.stock_requests.fetch_add(1, Ordering::SeqCst);
    *tables.last_authorization.write().await = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match tables.stock.read().await.get(&id) {
        Some(&amount) => Json(json!({ "id": id, "amount": amount })).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}
