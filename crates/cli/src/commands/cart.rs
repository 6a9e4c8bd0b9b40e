//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! tt-cli cart show
//! tt-cli cart add 3 -q 2
//! tt-cli cart update 3 -1
//! tt-cli cart remove 3
//! tt-cli cart clear --yes
//! ```

use thiserror::Error;
use twist_taste_core::{Confirmation, Price, ProductId};
use twist_taste_storefront::Storefront;

use super::report;

/// Errors from cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// No catalog product has this id.
    #[error("No product with id {0}")]
    UnknownProduct(ProductId),
}

/// Show every row and the totals.
pub fn show(storefront: &Storefront) {
    let cart = storefront.cart();
    if cart.is_empty() {
        tracing::info!("Your cart is empty");
        return;
    }

    for item in cart.items() {
        tracing::info!(
            "#{:<14} {:<32} {:>3} x {:>10} = {:>10}",
            item.id(),
            item.product.name,
            item.quantity,
            Price::qar(item.product.price).to_string(),
            Price::qar(item.line_total()).to_string()
        );
    }
    tracing::info!("{} item(s), total {}", cart.count(), cart.total_price());
}

/// Add `quantity` units of catalog product `id`.
///
/// # Errors
///
/// Returns `CartCommandError::UnknownProduct` if the catalog has no such product.
pub fn add(storefront: &mut Storefront, id: ProductId, quantity: u32) -> Result<(), CartCommandError> {
    let durability = storefront
        .add_to_cart(id, quantity)
        .ok_or(CartCommandError::UnknownProduct(id))?;
    report(durability);

    let cart = storefront.cart();
    tracing::info!("Cart: {} item(s), total {}", cart.count(), cart.total_price());
    Ok(())
}

/// Remove product `id` from the cart.
pub fn remove(storefront: &mut Storefront, id: ProductId) {
    report(storefront.cart_mut().remove(id));
}

/// Change the quantity of `id` by `delta`.
pub fn update(storefront: &mut Storefront, id: ProductId, delta: i64) {
    report(storefront.cart_mut().update_quantity(id, delta));
    if let Some(item) = storefront.cart().get(id) {
        tracing::info!("{} x {}", item.product.name, item.quantity);
    }
}

/// Empty the cart once confirmed.
pub fn clear(storefront: &mut Storefront, confirmation: Confirmation) {
    if !confirmation.is_confirmed() {
        tracing::info!("Cart not cleared; pass --yes to confirm");
        return;
    }
    report(storefront.cart_mut().clear());
    tracing::info!("Cart cleared");
}
