//! Product form validation.
//!
//! The admin add and edit forms collect raw text. [`ProductForm::validate`]
//! turns it into a [`NewProduct`] or rejects it before anything is mutated.

use std::path::Path;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rust_decimal::Decimal;
use thiserror::Error;
use twist_taste_core::{NewProduct, Product};

/// Category used when the form leaves it blank.
pub const DEFAULT_CATEGORY: &str = "أخرى";

/// Highest unit price accepted. Prices are stored as JSON numbers, and this
/// keeps them well inside the range that survives an `f64` round trip.
pub const MAX_PRICE: i64 = 1_000_000_000;

/// Largest image upload accepted, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 300 * 1024;

/// Reasons a product form is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductFormError {
    #[error("product name is required")]
    MissingName,

    #[error("product image is required")]
    MissingImage,

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("price cannot be negative")]
    NegativePrice,

    #[error("price cannot exceed {limit}")]
    PriceTooHigh { limit: i64 },

    #[error("image is {size} bytes, the limit is {limit}")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("unsupported image type: {0}")]
    UnsupportedImageType(String),
}

/// Raw admin form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub category: String,
    /// Remote link or inline `data:` URI from [`inline_image`].
    pub image: String,
}

impl ProductForm {
    /// Prefill the form from an existing product, for editing.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.normalize().to_string(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }

    /// Validate the input.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checking name, image, then price.
    pub fn validate(&self) -> Result<NewProduct, ProductFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProductFormError::MissingName);
        }

        let image = self.image.trim();
        if image.is_empty() {
            return Err(ProductFormError::MissingImage);
        }

        let price = parse_price(&self.price)?;

        let category = match self.category.trim() {
            "" => DEFAULT_CATEGORY,
            category => category,
        };

        Ok(NewProduct {
            name: name.to_owned(),
            price,
            description: self.description.trim().to_owned(),
            image: image.to_owned(),
            category: category.to_owned(),
        })
    }
}

fn parse_price(raw: &str) -> Result<Decimal, ProductFormError> {
    let raw = raw.trim();
    let price =
        Decimal::from_str(raw).map_err(|_| ProductFormError::InvalidPrice(raw.to_owned()))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductFormError::NegativePrice);
    }
    if price > Decimal::from(MAX_PRICE) {
        return Err(ProductFormError::PriceTooHigh { limit: MAX_PRICE });
    }
    Ok(price)
}

/// Encode an uploaded image as an inline `data:` URI.
///
/// # Errors
///
/// Returns `ProductFormError::ImageTooLarge` above [`MAX_UPLOAD_BYTES`] and
/// `ProductFormError::UnsupportedImageType` for non-image MIME types.
pub fn inline_image(bytes: &[u8], mime: &str) -> Result<String, ProductFormError> {
    if !mime.starts_with("image/") {
        return Err(ProductFormError::UnsupportedImageType(mime.to_owned()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ProductFormError::ImageTooLarge {
            size: bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// MIME type for an image file, by extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
