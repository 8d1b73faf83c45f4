//! Cart commands.
//!
//! Results are reported through `tracing`, alongside the toasts the cart
//! itself emits.

use rocketshoes_cart::{CartError, CartProvider, CartStorage, StoreApi, UpdateProductAmount};
use rocketshoes_core::ProductId;
use tracing::info;

/// Log every line of the cart followed by the total.
pub async fn show<A: StoreApi, S: CartStorage>(cart: &CartProvider<A, S>) {
    let products = cart.cart().await;
    if products.is_empty() {
        info!("Cart is empty");
        return;
    }

    for product in &products {
        info!(
            "#{:<4} {:<45} {:>3} x {:>12} = {:>12}",
            product.id,
            product.title().unwrap_or("-"),
            product.amount,
            product.unit_price().display(),
            product.subtotal().display()
        );
    }
    info!("Total: {}", cart.total().await.display());
}

/// Log the cart total.
pub async fn total<A: StoreApi, S: CartStorage>(cart: &CartProvider<A, S>) {
    info!(items = cart.len().await, "Total: {}", cart.total().await.display());
}

/// Empty the cart.
///
/// # Errors
///
/// Returns the storage failure that prevented clearing.
pub async fn clear<A: StoreApi, S: CartStorage>(cart: &CartProvider<A, S>) -> Result<(), CartError> {
    cart.clear().await?;
    info!("Cart emptied");
    Ok(())
}

/// Add one unit of `product_id`.
///
/// # Errors
///
/// Returns the cart error that rejected the addition.
pub async fn add<A: StoreApi, S: CartStorage>(
    cart: &CartProvider<A, S>,
    product_id: ProductId,
) -> Result<(), CartError> {
    cart.add_product(product_id).await?;
    log_amount(cart, product_id).await;
    Ok(())
}

/// Remove `product_id` from the cart.
///
/// # Errors
///
/// Returns the cart error that rejected the removal.
pub async fn remove<A: StoreApi, S: CartStorage>(
    cart: &CartProvider<A, S>,
    product_id: ProductId,
) -> Result<(), CartError> {
    cart.remove_product(product_id).await?;
    info!(%product_id, remaining = cart.len().await, "Product removed");
    Ok(())
}

/// Set `product_id` to `amount` units.
///
/// # Errors
///
/// Returns the cart error that rejected the change.
pub async fn update<A: StoreApi, S: CartStorage>(
    cart: &CartProvider<A, S>,
    product_id: ProductId,
    amount: i64,
) -> Result<(), CartError> {
    cart.update_product_amount(UpdateProductAmount { product_id, amount })
        .await?;
    log_amount(cart, product_id).await;
    Ok(())
}

async fn log_amount<A: StoreApi, S: CartStorage>(cart: &CartProvider<A, S>, product_id: ProductId) {
    let amount = cart
        .cart_items_amount()
        .await
        .get(&product_id)
        .copied()
        .unwrap_or_default();
    info!(%product_id, amount, "Cart quantity");
}
