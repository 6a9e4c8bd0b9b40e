//! Catalog administration commands.
//!
//! # Usage
//!
//! ```bash
//! export TT_ADMIN_KEY=...
//!
//! # Add a product with an embedded image
//! tt-cli admin add --name "Date Cake" --price 18 --category حلويات --image-file cake.jpg
//!
//! # Change only the price
//! tt-cli admin edit 1700000000000 --price 20
//!
//! # Destructive actions need --yes
//! tt-cli admin delete 1700000000000 --yes
//! tt-cli admin reset --yes
//! ```
//!
//! # Environment Variables
//!
//! - `TT_ADMIN_PASSPHRASE` - Passphrase configured for the admin panel
//! - `TT_ADMIN_KEY` - Passphrase entered by the operator (or `--passphrase`)

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use thiserror::Error;
use twist_taste_admin::form::{ProductForm, inline_image, mime_for_path};
use twist_taste_admin::services::auth::PassphraseAuthenticator;
use twist_taste_admin::{AdminConfig, AdminConsole, AdminError, AdminSession};
use twist_taste_core::{Confirmation, ProductId};

use super::report;

/// Errors that can occur reading admin input.
#[derive(Debug, Error)]
pub enum AdminCommandError {
    /// The image file could not be read.
    #[error("Cannot read image {path}: {source}")]
    UnreadableImage {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The image file extension is not a known image type.
    #[error("Unsupported image file: {0}")]
    UnknownImageType(PathBuf),

    /// Admin operation failed.
    #[error(transparent)]
    Admin(#[from] AdminError),
}

/// Product fields given on the command line. `None` leaves a field blank on
/// add and unchanged on edit.
#[derive(Debug, Default)]
pub struct ProductEdit {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub image_file: Option<PathBuf>,
}

impl ProductEdit {
    fn apply(self, form: &mut ProductForm) -> Result<(), AdminCommandError> {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(image) = self.image {
            form.image = image;
        }
        if let Some(path) = self.image_file {
            form.image = load_image(&path)?;
        }
        Ok(())
    }
}

/// Unlock an admin session with the operator's passphrase.
///
/// # Errors
///
/// Returns an error if `TT_ADMIN_PASSPHRASE` is missing or weak, or if
/// `passphrase` does not match it.
pub fn unlock(
    passphrase: &SecretString,
) -> Result<AdminSession<PassphraseAuthenticator>, AdminError> {
    let config = AdminConfig::from_env()?;
    let mut session = AdminSession::new(PassphraseAuthenticator::new(&config.passphrase)?);
    session.unlock(passphrase)?;
    Ok(session)
}

/// Add a product.
///
/// # Errors
///
/// Returns an error if the image cannot be read or the form is invalid.
pub fn add(console: &mut AdminConsole<'_>, edit: ProductEdit) -> Result<(), AdminCommandError> {
    let mut form = ProductForm::default();
    edit.apply(&mut form)?;

    let (id, durability) = console.add(&form)?;
    report(durability);
    tracing::info!("Added product #{id}");
    Ok(())
}

/// Edit a product, keeping fields that were not given.
///
/// # Errors
///
/// Returns an error if the product does not exist, the image cannot be read
/// or the resulting form is invalid.
pub fn edit(
    console: &mut AdminConsole<'_>,
    id: ProductId,
    edit: ProductEdit,
) -> Result<(), AdminCommandError> {
    let existing = console
        .products()
        .iter()
        .find(|p| p.id == id)
        .ok_or(AdminError::NotFound(id))?;
    let mut form = ProductForm::from_product(existing);
    edit.apply(&mut form)?;

    report(console.edit(id, &form)?);
    tracing::info!("Updated product #{id}");
    Ok(())
}

/// Delete a product once confirmed.
///
/// # Errors
///
/// Returns an error if the product does not exist.
pub fn delete(
    console: &mut AdminConsole<'_>,
    id: ProductId,
    confirmation: Confirmation,
) -> Result<(), AdminError> {
    report(console.delete(id, confirmation)?);
    if confirmation.is_confirmed() {
        tracing::info!("Deleted product #{id}");
    } else {
        tracing::info!("Product #{id} kept; pass --yes to confirm");
    }
    Ok(())
}

/// Reset the catalog to the defaults once confirmed.
pub fn reset(console: &mut AdminConsole<'_>, confirmation: Confirmation) {
    report(console.reset(confirmation));
    if confirmation.is_confirmed() {
        tracing::info!("Catalog reset to defaults");
    } else {
        tracing::info!("Catalog kept; pass --yes to confirm");
    }
}

fn load_image(path: &Path) -> Result<String, AdminCommandError> {
    let mime =
        mime_for_path(path).ok_or_else(|| AdminCommandError::UnknownImageType(path.to_path_buf()))?;
    let bytes = std::fs::read(path).map_err(|source| AdminCommandError::UnreadableImage {
        path: path.to_path_buf(),
        source,
    })?;
    inline_image(&bytes, mime).map_err(|e| AdminError::Form(e).into())
}
