//! Cart error types.
//!
//! Every failure keeps its cause so callers can tell a network problem from a
//! rejected quantity, while [`CartError::toast_message`] collapses them into
//! the fixed message shown to the shopper.

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::api::ApiError;
use crate::notify::messages;
use crate::storage::StorageError;

/// Cart operation that produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

/// Errors returned by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Catalog or stock lookup failed.
    #[error("Store API error: {0}")]
    Api(#[from] ApiError),

    /// Requested quantity is zero or negative.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Requested quantity exceeds available stock.
    #[error("Product {product_id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// Product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Persisted cart could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CartError {
    /// Message shown to the shopper when this error ends `operation`.
    #[must_use]
    pub const fn toast_message(&self, operation: CartOperation) -> &'static str {
        match self {
            Self::InvalidAmount(_) | Self::OutOfStock { .. } => messages::OUT_OF_STOCK,
            _ => match operation {
                CartOperation::Add => messages::ADD_FAILED,
                CartOperation::Remove => messages::REMOVE_FAILED,
                CartOperation::UpdateAmount => messages::UPDATE_FAILED,
            },
        }
    }

    /// Whether this error comes from infrastructure rather than shopper input.
    ///
    /// An unknown product id is the shopper's mistake, not an outage.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        match self {
            Self::Api(ApiError::NotFound(_))
            | Self::InvalidAmount(_)
            | Self::OutOfStock { .. }
            | Self::NotInCart(_) => false,
            Self::Api(_) | Self::Storage(_) | Self::Serialization(_) => true,
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NotInCart(ProductId::new(3));
        assert_eq!(err.to_string(), "Product 3 is not in the cart");

        let err = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Product 1 out of stock: requested 5, available 2"
        );
    }

    #[test]
    fn test_toast_messages() {
        let not_found = CartError::Api(ApiError::NotFound("/products/9".to_string()));
        assert_eq!(
            not_found.toast_message(CartOperation::Add),
            "Erro na adição do produto"
        );
        assert_eq!(
            not_found.toast_message(CartOperation::UpdateAmount),
            "Erro na alteração de quantidade do produto"
        );
        assert_eq!(
            CartError::NotInCart(ProductId::new(9)).toast_message(CartOperation::Remove),
            "Erro na remoção do produto"
        );
        assert_eq!(
            CartError::InvalidAmount(0).toast_message(CartOperation::UpdateAmount),
            "Quantidade solicitada fora de estoque"
        );
    }

    #[test]
    fn test_is_infrastructure() {
        assert!(CartError::Api(ApiError::RateLimited(2)).is_infrastructure());
        assert!(
            CartError::Storage(StorageError::Io {
                key: "@RocketShoes:cart".to_string(),
                source: std::io::Error::other("disk full"),
            })
            .is_infrastructure()
        );
        assert!(!CartError::Api(ApiError::NotFound("/products/99".to_string())).is_infrastructure());
        assert!(!CartError::InvalidAmount(-1).is_infrastructure());
        assert!(!CartError::NotInCart(ProductId::new(1)).is_infrastructure());
    }
}
