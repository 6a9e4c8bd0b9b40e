//! Shopping cart store.
//!
//! Rows are snapshots of the product taken when it was first added; catalog
//! edits made afterwards do not change them. Totals are derived from the rows
//! on every read.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::instrument;
use twist_taste_core::{CartItem, Price, Product, ProductId};

use crate::error::add_breadcrumb;
use crate::storage::{Durability, KeyValueStore, Record};

/// Storage key of the cart record.
pub const CART_KEY: &str = "twist_taste_cart";

/// The shopper's cart and its persisted record.
#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    record: Record,
}

impl CartStore {
    /// Load the saved cart. A missing or malformed record yields an empty cart.
    #[instrument(skip_all)]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let record = Record::new(storage, CART_KEY);
        let items = sanitize(record.load::<Vec<CartItem>>().unwrap_or_default());

        tracing::debug!(rows = items.len(), "Cart loaded");
        Self { items, record }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Sum of price times quantity over every row, saturating at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// [`Self::total`] in the store currency.
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::qar(self.total())
    }

    /// Number of units across every row.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Add `quantity` units of `product`, merging into an existing row.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product, quantity: u32) -> Durability {
        if quantity == 0 {
            return Durability::Unchanged;
        }

        match self.items.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem::new(product.clone(), quantity)),
        }

        let id = product.id.to_string();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
        self.persist()
    }

    /// Remove a row. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: ProductId) -> Durability {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            return Durability::Unchanged;
        }

        let id = id.to_string();
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
        self.persist()
    }

    /// Adjust a row's quantity by `delta`, never going below one.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> Durability {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return Durability::Unchanged;
        };

        let target = i64::from(item.quantity).saturating_add(delta).max(1);
        let quantity = u32::try_from(target).unwrap_or(u32::MAX);
        if quantity == item.quantity {
            return Durability::Unchanged;
        }
        item.quantity = quantity;

        self.persist()
    }

    /// Empty the cart and persist the empty state.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Durability {
        self.items.clear();
        add_breadcrumb("cart", "Cart cleared", None);
        self.persist()
    }

    fn persist(&mut self) -> Durability {
        self.record.save(&self.items)
    }
}

/// Merge duplicate rows and lift zero quantities to one.
fn sanitize(rows: Vec<CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(rows.len());
    for mut row in rows {
        row.quantity = row.quantity.max(1);
        match items.iter_mut().find(|item| item.id() == row.id()) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(row.quantity),
            None => items.push(row),
        }
    }
    items
}
