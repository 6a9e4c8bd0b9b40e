//! Product catalog store.
//!
//! The catalog shown to shoppers is the built-in default list merged with
//! products the store owner added through the admin console. Both live in one
//! persisted record, `twist_taste_products`.
//!
//! # Reconciliation
//!
//! On load the default list is authoritative: any persisted entry that shares
//! an id with a default is dropped, so a new release's defaults are visible
//! immediately. Remaining persisted entries are appended after the defaults.
//! Every entry's image is then checked and repaired (see [`images`]).

pub mod defaults;
pub mod ids;
pub mod images;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::instrument;
use twist_taste_core::{NewProduct, Product, ProductId};

use crate::storage::{Durability, KeyValueStore, Record};

pub use defaults::default_catalog;
pub use ids::{ClockIds, IdAllocator, SequentialIds};

/// Storage key of the catalog record.
pub const PRODUCTS_KEY: &str = "twist_taste_products";

/// The current product list and its persisted record.
#[derive(Debug)]
pub struct CatalogStore {
    products: Vec<Product>,
    defaults: Vec<Product>,
    record: Record,
    ids: Box<dyn IdAllocator>,
}

impl CatalogStore {
    /// Load the catalog, allocating new ids from the clock.
    pub fn load(storage: Arc<dyn KeyValueStore>, defaults: Vec<Product>) -> Self {
        Self::load_with_ids(storage, defaults, Box::new(ClockIds::new()))
    }

    /// Load the catalog with a specific id allocator.
    #[instrument(skip_all, fields(defaults = defaults.len()))]
    pub fn load_with_ids(
        storage: Arc<dyn KeyValueStore>,
        defaults: Vec<Product>,
        ids: Box<dyn IdAllocator>,
    ) -> Self {
        let record = Record::new(storage, PRODUCTS_KEY);
        let persisted = record.load::<Vec<Product>>();
        let products = reconcile(&defaults, persisted);

        tracing::debug!(products = products.len(), "Catalog loaded");

        Self {
            products,
            defaults,
            record,
            ids,
        }
    }

    /// Current products, newest additions first, then defaults, then older
    /// custom products.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The built-in catalog this store was loaded with.
    #[must_use]
    pub fn defaults(&self) -> &[Product] {
        &self.defaults
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Products in `category`, or every product when `None`.
    pub fn in_category<'a>(
        &'a self,
        category: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| category.is_none_or(|c| p.category == c))
    }

    /// Add a product under a fresh id, ahead of every existing product.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub fn add(&mut self, new: NewProduct) -> (ProductId, Durability) {
        let id = self.fresh_id();
        let mut product = new.with_id(id);
        images::repair(&mut product, &self.defaults);

        self.products.insert(0, product);
        tracing::info!(product_id = %id, "Product added");
        (id, self.persist())
    }

    /// Replace the product with the same id. Unknown ids are ignored.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn edit(&mut self, mut product: Product) -> Durability {
        let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) else {
            tracing::debug!("Ignoring edit of unknown product");
            return Durability::Unchanged;
        };

        images::repair(&mut product, &self.defaults);
        *slot = product;
        tracing::info!("Product updated");
        self.persist()
    }

    /// Remove a product. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: ProductId) -> Durability {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return Durability::Unchanged;
        }

        tracing::info!("Product deleted");
        self.persist()
    }

    /// Restore the default catalog and drop the persisted record entirely.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Durability {
        self.products.clone_from(&self.defaults);
        tracing::info!("Catalog reset to defaults");
        self.record.purge()
    }

    fn fresh_id(&mut self) -> ProductId {
        loop {
            let id = self.ids.allocate();
            if self.get(id).is_none() && !self.defaults.iter().any(|d| d.id == id) {
                return id;
            }
            tracing::debug!(product_id = %id, "Allocated id already in use, drawing again");
        }
    }

    fn persist(&mut self) -> Durability {
        self.record.save(&self.products)
    }
}

/// Merge the default catalog with a persisted product list.
///
/// Defaults come first and always win on id collisions. Persisted entries are
/// de-duplicated by id (first occurrence kept) and every image is repaired.
#[must_use]
pub fn reconcile(defaults: &[Product], persisted: Option<Vec<Product>>) -> Vec<Product> {
    let mut seen: HashSet<ProductId> = defaults.iter().map(|p| p.id).collect();
    let mut products = defaults.to_vec();

    let persisted = persisted.unwrap_or_default();
    let total = persisted.len();
    products.extend(persisted.into_iter().filter(|p| seen.insert(p.id)));

    let dropped = total - (products.len() - defaults.len());
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped persisted products shadowed by defaults or duplicates");
    }

    for product in &mut products {
        images::repair(product, defaults);
    }
    products
}
