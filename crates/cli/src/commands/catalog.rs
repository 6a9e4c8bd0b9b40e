//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! tt-cli catalog list
//! tt-cli catalog list --category معجنات
//! tt-cli catalog categories
//! ```

use twist_taste_core::Price;
use twist_taste_storefront::Storefront;

/// List products, optionally only those in `category`.
pub fn list(storefront: &Storefront, category: Option<&str>) {
    let mut shown = 0usize;
    for product in storefront.catalog().in_category(category) {
        tracing::info!(
            "#{:<14} {:<32} {:>10}  [{}]",
            product.id,
            product.name,
            Price::qar(product.price).to_string(),
            product.category
        );
        shown += 1;
    }

    if shown == 0 {
        tracing::info!("No products found");
    }
}

/// List categories in display order.
pub fn categories(storefront: &Storefront) {
    let catalog = storefront.catalog();
    for category in catalog.categories() {
        let count = catalog.in_category(Some(category)).count();
        tracing::info!("{category} ({count})");
    }
}
