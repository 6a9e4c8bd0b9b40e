//! Storefront state shared by the shopper and admin flows.

use std::sync::Arc;

use tracing::instrument;
use twist_taste_core::{Product, ProductId};
use url::Url;

use crate::cart::CartStore;
use crate::catalog::{CatalogStore, default_catalog};
use crate::checkout::{
    CheckoutError, CheckoutReceipt, CheckoutSession, HtmlInvoiceRenderer, LogNotifier,
};
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::links::{order_message, whatsapp_link};
use crate::storage::{Durability, FileStore, KeyValueStore};

/// The catalog, the cart and the collaborators checkout needs.
///
/// Both stores share one backing [`KeyValueStore`] but keep separate records.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    storage: Arc<dyn KeyValueStore>,
    catalog: CatalogStore,
    cart: CartStore,
    renderer: HtmlInvoiceRenderer,
    notifier: LogNotifier,
}

impl Storefront {
    /// Open the file store named by `config` and load both stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    #[instrument(skip_all, fields(data_dir = %config.data_dir.display()))]
    pub fn open(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let store = FileStore::open(&config.data_dir, config.storage_quota_bytes)?;
        Ok(Self::with_storage(config, Arc::new(store)))
    }

    /// Load both stores from an existing backend with the built-in catalog.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_catalog(config, storage, default_catalog())
    }

    /// Load both stores from an existing backend with a custom default catalog.
    #[must_use]
    pub fn with_catalog(
        config: StorefrontConfig,
        storage: Arc<dyn KeyValueStore>,
        defaults: Vec<Product>,
    ) -> Self {
        let catalog = CatalogStore::load(storage.clone(), defaults);
        let cart = CartStore::load(storage.clone());
        let renderer = HtmlInvoiceRenderer::new(config.invoice_dir.clone());
        let notifier = LogNotifier::new(config.notify_destination.clone());

        Self {
            config,
            storage,
            catalog,
            cart,
            renderer,
            notifier,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The shared backend.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        self.storage.clone()
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub const fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Put a catalog product in the cart.
    ///
    /// Returns `None` if the catalog has no product with that id.
    pub fn add_to_cart(&mut self, id: ProductId, quantity: u32) -> Option<Durability> {
        let product = self.catalog.get(id)?;
        Some(self.cart.add(product, quantity))
    }

    /// Submit a reviewed checkout with the configured invoice renderer and
    /// notifier.
    ///
    /// # Errors
    ///
    /// See [`CheckoutSession::submit`].
    pub async fn submit(
        &mut self,
        session: &mut CheckoutSession,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        session
            .submit(&mut self.cart, &self.renderer, &self.notifier)
            .await
    }

    /// WhatsApp link to the store, optionally prefilled with the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured number is unusable.
    pub fn contact_link(&self, with_cart: bool) -> Result<Url, url::ParseError> {
        let text = (with_cart && !self.cart.is_empty())
            .then(|| order_message(self.cart.items(), self.cart.total_price()));
        whatsapp_link(&self.config.whatsapp_number, text.as_deref())
    }
}
