//! WhatsApp contact link.

use twist_taste_storefront::Storefront;

/// Print the link, prefilled with the cart when `with_cart` is set.
///
/// # Errors
///
/// Returns an error if the configured WhatsApp number is unusable.
pub fn link(storefront: &Storefront, with_cart: bool) -> Result<(), Box<dyn std::error::Error>> {
    let url = storefront.contact_link(with_cart)?;
    tracing::info!("{url}");
    Ok(())
}
