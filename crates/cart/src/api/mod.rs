//! Store API access: catalog products and stock levels.
//!
//! # Architecture
//!
//! - [`StoreApi`] is the seam the cart container depends on
//! - [`ApiClient`] implements it over HTTP with `reqwest`
//! - Catalog products are cached in memory via `moka` (5 minute TTL);
//!   stock is always fetched fresh
//!
//! # Endpoints
//!
//! - `GET {base}/products/{id}` - product details
//! - `GET {base}/stock/{id}` - `{ "id": 1, "amount": 3 }`

mod client;

use std::future::Future;

use rocketshoes_core::{Product, ProductId, Stock};
use thiserror::Error;

pub use client::ApiClient;

/// Errors that can occur when talking to the store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// Configured base URL is unusable.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint: {0}")]
    Url(#[from] url::ParseError),
}

/// Read access to the catalog and inventory.
pub trait StoreApi: Send + Sync {
    /// Fetch a product's catalog entry. The returned product has `amount == 0`.
    fn product(&self, id: ProductId) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// Fetch the current stock level for a product.
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, ApiError>> + Send;
}
