//! Catalog products and cart rows.
//!
//! Both types serialize to the flat JSON objects kept in the persisted
//! catalog and cart records:
//!
//! ```json
//! {"id": 1, "name": "...", "price": 12.0, "description": "...", "image": "https://...", "category": "..."}
//! ```
//!
//! A cart row is the same object with an extra `quantity` field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency. Stored as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    /// Remote link or inline `data:` payload.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

/// A product that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl NewProduct {
    /// Attach an id, producing a catalog entry.
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            image: self.image,
            category: self.category,
        }
    }
}

/// One line of the shopping cart.
///
/// Holds a copy of the product as it was when first added; later catalog
/// edits do not reach rows already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart row from a product snapshot.
    #[must_use]
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The product id this row is keyed by.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }
}
