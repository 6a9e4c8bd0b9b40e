//! Status enums shared by the storefront and admin crates.

use serde::{Deserialize, Serialize};

/// Step of the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Contact form is being filled in.
    #[default]
    CollectingDetails,
    /// Shopper is looking over the order before submitting.
    Reviewing,
    /// Invoice produced and notification attempted.
    Completed,
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CollectingDetails => write!(f, "collecting_details"),
            Self::Reviewing => write!(f, "reviewing"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Answer to an "are you sure?" prompt before a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// Map a yes/no flag onto a confirmation.
    #[must_use]
    pub const fn from_flag(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }

    #[must_use]
    pub const fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}
