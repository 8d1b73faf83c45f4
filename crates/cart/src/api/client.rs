//! HTTP implementation of [`StoreApi`].

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use rocketshoes_core::{Product, ProductId, Stock};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, StoreApi};
use crate::config::{ApiConfig, parse_base_url};

/// Maximum number of response body characters kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the RocketShoes store API.
///
/// Cheap to clone; clones share the connection pool and product cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    products: Cache<ProductId, Product>,
}

impl ApiClient {
    /// Create a new store API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let base_url = parse_base_url(config.base_url.as_str())
            .map_err(ApiError::InvalidBaseUrl)?;

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url,
                token: config.token.clone(),
                products,
            }),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Drop every cached product.
    pub fn invalidate_products(&self) {
        self.inner.products.invalidate_all();
    }

    fn endpoint(&self, resource: &str, id: ProductId) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(&format!("{resource}/{id}"))?)
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let mut request = self
            .inner
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.path().to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let excerpt = body.chars().take(BODY_EXCERPT_CHARS).collect::<String>();
            tracing::error!(
                status = %status,
                url = %url,
                body = %excerpt,
                "Store API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: excerpt,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %body.chars().take(BODY_EXCERPT_CHARS).collect::<String>(),
                "Failed to parse store API response"
            );
            ApiError::Parse(e)
        })
    }
}

impl StoreApi for ApiClient {
    #[instrument(skip_all, fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        if let Some(product) = self.inner.products.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let url = self.endpoint("products", id)?;
        let product: Product = self.get_json(url).await?;
        let product = product.with_amount(0);

        self.inner.products.insert(id, product.clone()).await;
        Ok(product)
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<Stock, ApiError> {
        let url = self.endpoint("stock", id)?;
        let stock: Stock = self.get_json(url).await?;
        debug!(available = stock.amount, "Fetched stock");
        Ok(stock)
    }
}
