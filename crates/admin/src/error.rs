//! Admin error type.

use thiserror::Error;
use twist_taste_core::ProductId;

use crate::config::ConfigError;
use crate::form::ProductFormError;
use crate::services::auth::AuthError;

/// Errors returned by admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Authentication failed or the session is locked.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The product form was rejected.
    #[error("Invalid product: {0}")]
    Form(#[from] ProductFormError),

    /// No product with this id.
    #[error("Not found: product {0}")]
    NotFound(ProductId),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::NotFound(ProductId::new(42));
        assert_eq!(err.to_string(), "Not found: product 42");

        let err = AdminError::from(ProductFormError::MissingName);
        assert_eq!(err.to_string(), "Invalid product: product name is required");

        let err = AdminError::from(AuthError::Locked);
        assert_eq!(err.to_string(), "Auth error: admin session is locked");
    }
}
