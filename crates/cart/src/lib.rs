//! RocketShoes cart library.
//!
//! Holds a shopper's cart, keeps it mirrored in durable key-value storage,
//! and validates quantity changes against the store API's stock levels.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use rocketshoes_cart::{ApiClient, CartConfig, CartProvider, FileStorage, TracingNotifier};
//! use rocketshoes_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let api = ApiClient::new(&config.api)?;
//! let storage = FileStorage::new(&config.storage.dir);
//! let cart = CartProvider::load(api, storage, Arc::new(TracingNotifier), &config.storage.key).await?;
//!
//! cart.add_product(ProductId::new(1)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod provider;
pub mod storage;

pub use api::{ApiClient, ApiError, StoreApi};
pub use config::{ApiConfig, CartConfig, ConfigError, StorageConfig};
pub use error::{CartError, CartOperation};
pub use notify::{Notifier, RecordingNotifier, Toast, ToastKind, TracingNotifier};
pub use provider::{CartProvider, UpdateProductAmount};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
