//! Shopper contact details for a single checkout attempt.

use serde::{Deserialize, Serialize};

/// Errors raised when contact details are incomplete.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderDetailsError {
    /// A required field is empty or whitespace.
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Contact details collected during checkout.
///
/// Never persisted; lives only as long as the checkout session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderDetails {
    /// Check that name, phone and address are present.
    ///
    /// # Errors
    ///
    /// Returns the first missing field, in form order.
    pub fn validate(&self) -> Result<(), OrderDetailsError> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(OrderDetailsError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Notes with surrounding whitespace removed, `None` when blank.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }
}
