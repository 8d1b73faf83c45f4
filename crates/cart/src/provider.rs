//! Cart state container.
//!
//! [`CartProvider`] owns the in-memory cart and its persisted mirror. It is
//! built with its collaborators injected (store API, storage, notifier) and
//! handed to whichever front end needs the cart; clones share one cart.
//!
//! # Operation flow
//!
//! Each mutation locks the cart, validates (calling the store API where
//! needed), computes the new list, persists it, and only then replaces the
//! in-memory list. The lock is held across the remote call, so overlapping
//! operations run one after another instead of overwriting each other.
//!
//! Every outcome is also reported to the [`Notifier`] as a toast.

use std::collections::BTreeMap;
use std::sync::Arc;

use rocketshoes_core::{Price, Product, ProductId};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::api::StoreApi;
use crate::error::{CartError, CartOperation, Result};
use crate::notify::{Notifier, Toast, messages};
use crate::storage::CartStorage;

/// Request to set a product's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Desired quantity. Must be positive and within stock.
    pub amount: i64,
}

/// Shared handle to a cart.
pub struct CartProvider<A, S> {
    inner: Arc<CartProviderInner<A, S>>,
}

struct CartProviderInner<A, S> {
    api: A,
    storage: S,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
    cart: Mutex<Vec<Product>>,
}

impl<A, S> Clone for CartProvider<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: StoreApi, S: CartStorage> CartProvider<A, S> {
    /// Create a provider, restoring the cart persisted under `storage_key`.
    ///
    /// A missing slot yields an empty cart. So does a slot that no longer
    /// parses; the bad contents are left in place until the next mutation
    /// overwrites them.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the slot cannot be read.
    pub async fn load(
        api: A,
        storage: S,
        notifier: Arc<dyn Notifier>,
        storage_key: impl Into<String>,
    ) -> Result<Self> {
        let storage_key = storage_key.into();

        let cart = match storage.get_item(&storage_key).await? {
            Some(raw) => serde_json::from_str::<Vec<Product>>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, key = %storage_key, "Discarding unreadable persisted cart");
                Vec::new()
            }),
            None => Vec::new(),
        };

        info!(key = %storage_key, items = cart.len(), "Cart loaded");

        Ok(Self {
            inner: Arc::new(CartProviderInner {
                api,
                storage,
                notifier,
                storage_key,
                cart: Mutex::new(cart),
            }),
        })
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// Snapshot of the cart, in insertion order.
    pub async fn cart(&self) -> Vec<Product> {
        self.inner.cart.lock().await.clone()
    }

    /// Number of distinct products.
    pub async fn len(&self) -> usize {
        self.inner.cart.lock().await.len()
    }

    /// Whether the cart holds nothing.
    pub async fn is_empty(&self) -> bool {
        self.inner.cart.lock().await.is_empty()
    }

    /// Quantity per product, as shown on product cards.
    pub async fn cart_items_amount(&self) -> BTreeMap<ProductId, u32> {
        self.inner
            .cart
            .lock()
            .await
            .iter()
            .map(|product| (product.id, product.amount))
            .collect()
    }

    /// Line subtotal for `product_id`, if it is in the cart.
    pub async fn subtotal(&self, product_id: ProductId) -> Option<Price> {
        self.inner
            .cart
            .lock()
            .await
            .iter()
            .find(|product| product.id == product_id)
            .map(Product::subtotal)
    }

    /// Sum of every line's subtotal.
    pub async fn total(&self) -> Price {
        self.inner
            .cart
            .lock()
            .await
            .iter()
            .map(Product::subtotal)
            .sum()
    }

    /// Slot the cart is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.inner.storage_key
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// A product already in the cart goes through
    /// [`update_product_amount`](Self::update_product_amount) with its amount
    /// plus one, so it is checked against stock. A new product is fetched from
    /// the catalog and appended with amount 1.
    ///
    /// # Errors
    ///
    /// Returns the failure that stopped the operation; the cart is unchanged.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<()> {
        let mut cart = self.inner.cart.lock().await;

        let existing = cart
            .iter()
            .find(|product| product.id == product_id)
            .map(|product| product.amount);

        if let Some(current) = existing {
            let request = UpdateProductAmount {
                product_id,
                amount: i64::from(current) + 1,
            };
            let result = self.apply_amount(&mut cart, request).await;
            return self.settle(CartOperation::UpdateAmount, result);
        }

        let result = self.append(&mut cart, product_id).await;
        self.settle(CartOperation::Add, result)
    }

    /// Remove a product entirely.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the product is absent, or the
    /// storage failure that prevented the removal.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<()> {
        let mut cart = self.inner.cart.lock().await;

        let result = if cart.iter().any(|product| product.id == product_id) {
            let updated = cart
                .iter()
                .filter(|product| product.id != product_id)
                .cloned()
                .collect();
            self.commit(&mut cart, updated).await
        } else {
            Err(CartError::NotInCart(product_id))
        };

        self.settle(CartOperation::Remove, result)
    }

    /// Set a product's quantity after checking it against current stock.
    ///
    /// # Errors
    ///
    /// - `CartError::InvalidAmount` for a zero or negative amount
    /// - `CartError::NotInCart` if the product is absent
    /// - `CartError::OutOfStock` if the amount exceeds stock
    /// - `CartError::Api` / `CartError::Storage` on infrastructure failure
    #[instrument(skip_all, fields(product_id = %request.product_id, amount = request.amount))]
    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> Result<()> {
        let mut cart = self.inner.cart.lock().await;
        let result = self.apply_amount(&mut cart, request).await;
        self.settle(CartOperation::UpdateAmount, result)
    }

    /// Empty the cart and delete its storage slot.
    ///
    /// # Errors
    ///
    /// Returns the storage failure that prevented the deletion; the cart is
    /// unchanged.
    #[instrument(skip_all)]
    pub async fn clear(&self) -> Result<()> {
        let mut cart = self.inner.cart.lock().await;
        if let Err(e) = self.inner.storage.remove_item(&self.inner.storage_key).await {
            tracing::error!(error = %e, "Failed to clear cart");
            return Err(e.into());
        }
        cart.clear();
        info!("Cart cleared");
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn append(&self, cart: &mut Vec<Product>, product_id: ProductId) -> Result<()> {
        let product = self.inner.api.product(product_id).await?.with_amount(1);

        let mut updated = Vec::with_capacity(cart.len() + 1);
        updated.extend(cart.iter().cloned());
        updated.push(product);

        self.commit(cart, updated).await
    }

    async fn apply_amount(
        &self,
        cart: &mut Vec<Product>,
        request: UpdateProductAmount,
    ) -> Result<()> {
        let UpdateProductAmount { product_id, amount } = request;

        if amount <= 0 {
            return Err(CartError::InvalidAmount(amount));
        }
        if !cart.iter().any(|product| product.id == product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let stock = self.inner.api.stock(product_id).await?;
        let requested = match u32::try_from(amount) {
            Ok(requested) if requested <= stock.amount => requested,
            _ => {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: amount,
                    available: stock.amount,
                });
            }
        };

        let updated = cart
            .iter()
            .map(|product| {
                if product.id == product_id {
                    product.clone().with_amount(requested)
                } else {
                    product.clone()
                }
            })
            .collect();

        self.commit(cart, updated).await
    }

    /// Persist `updated`, then make it the in-memory cart.
    async fn commit(&self, cart: &mut Vec<Product>, updated: Vec<Product>) -> Result<()> {
        let raw = serde_json::to_string(&updated)?;
        self.inner
            .storage
            .set_item(&self.inner.storage_key, &raw)
            .await?;

        *cart = updated;
        info!(items = cart.len(), "Cart updated");
        Ok(())
    }

    /// Report an operation's outcome and hand it back.
    fn settle(&self, operation: CartOperation, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => {
                if operation == CartOperation::Add {
                    self.inner
                        .notifier
                        .notify(Toast::success(messages::PRODUCT_ADDED));
                }
                Ok(())
            }
            Err(e) => {
                if e.is_infrastructure() {
                    tracing::error!(error = %e, ?operation, "Cart operation failed");
                } else {
                    warn!(error = %e, ?operation, "Cart operation rejected");
                }
                self.inner
                    .notifier
                    .notify(Toast::error(e.toast_message(operation)));
                Err(e)
            }
        }
    }
}
