//! Catalog product and stock records.
//!
//! These mirror the JSON served by the store API (`/products/{id}` and
//! `/stock/{id}`). A [`Product`] doubles as a cart line: its `amount` is the
//! quantity in the cart and is absent from catalog responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product, either as returned by the catalog or as held in a cart.
///
/// Only `id`, `price` and `amount` are read by the cart. Display attributes
/// (`title` or `name`, `image` and the rest) stay in `extra` exactly as the catalog
/// sent them, so they round-trip through persistence unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier, unique within a cart.
    pub id: ProductId,
    /// Unit price in reais, kept as a JSON number on the wire.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Quantity in the cart. Zero for a product fresh from the catalog.
    #[serde(default)]
    pub amount: u32,
    /// Every other catalog field.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Consume a catalog product and return it as a cart line holding `amount`.
    #[must_use]
    pub fn with_amount(self, amount: u32) -> Self {
        Self { amount, ..self }
    }

    /// Display name, from `title` or else `name`.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.text_field("title").or_else(|| self.text_field("name"))
    }

    fn text_field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }

    /// Unit price as a [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.price)
    }

    /// Unit price multiplied by the cart quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        Price::new(self.price * Decimal::from(self.amount))
    }
}

/// Remote inventory ceiling for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Product this stock entry belongs to.
    pub id: ProductId,
    /// Units available.
    pub amount: u32,
}
