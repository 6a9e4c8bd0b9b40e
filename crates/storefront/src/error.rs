//! Unified error handling with Sentry integration.
//!
//! Store mutations never fail outright (see [`crate::storage::Durability`]),
//! so the only storefront-level failure is opening the backing store.
//! Checkout steps return [`crate::CheckoutError`] directly.
//! Unexpected failures are reported through [`capture`] before they are
//! returned.

use thiserror::Error;

use crate::storage::StorageError;

/// Top-level error for storefront operations.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The backing store could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Report an unexpected error to Sentry.
///
/// A no-op when Sentry has not been initialised.
pub fn capture(error: &(dyn std::error::Error + 'static)) {
    let event_id = sentry::capture_error(error);
    tracing::debug!(sentry_event_id = %event_id, "Captured error");
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of cart and
/// checkout actions leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
