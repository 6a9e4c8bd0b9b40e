//! Catalog editing for an unlocked admin.
//!
//! Every operation validates its input before touching the catalog, so a
//! rejected form never causes a partial save. Destructive operations take a
//! [`Confirmation`] and do nothing when it is declined.

use tracing::instrument;
use twist_taste_core::{Confirmation, Product, ProductId};
use twist_taste_storefront::{CatalogStore, Durability};

use crate::error::{AdminError, Result};
use crate::form::ProductForm;
use crate::services::auth::AdminIdentity;

/// Catalog operations available to an unlocked admin session.
#[derive(Debug)]
pub struct AdminConsole<'a> {
    identity: &'a AdminIdentity,
    catalog: &'a mut CatalogStore,
}

impl<'a> AdminConsole<'a> {
    pub(crate) const fn new(identity: &'a AdminIdentity, catalog: &'a mut CatalogStore) -> Self {
        Self { identity, catalog }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    /// Add a product from a form.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Form` if the form is invalid.
    #[instrument(skip_all, fields(admin = %self.identity.name))]
    pub fn add(&mut self, form: &ProductForm) -> Result<(ProductId, Durability)> {
        let product = form.validate()?;
        Ok(self.catalog.add(product))
    }

    /// Replace product `id` with the form contents.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` for an unknown id and `AdminError::Form`
    /// if the form is invalid.
    #[instrument(skip(self, form), fields(admin = %self.identity.name))]
    pub fn edit(&mut self, id: ProductId, form: &ProductForm) -> Result<Durability> {
        if self.catalog.get(id).is_none() {
            return Err(AdminError::NotFound(id));
        }
        let product = form.validate()?.with_id(id);
        Ok(self.catalog.edit(product))
    }

    /// Delete product `id` once confirmed.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` for an unknown id.
    #[instrument(skip(self), fields(admin = %self.identity.name))]
    pub fn delete(&mut self, id: ProductId, confirmation: Confirmation) -> Result<Durability> {
        if self.catalog.get(id).is_none() {
            return Err(AdminError::NotFound(id));
        }
        if !confirmation.is_confirmed() {
            tracing::debug!("Delete declined");
            return Ok(Durability::Unchanged);
        }
        Ok(self.catalog.delete(id))
    }

    /// Restore the default catalog once confirmed.
    #[instrument(skip(self), fields(admin = %self.identity.name))]
    pub fn reset(&mut self, confirmation: Confirmation) -> Durability {
        if !confirmation.is_confirmed() {
            tracing::debug!("Reset declined");
            return Durability::Unchanged;
        }
        self.catalog.reset()
    }
}
