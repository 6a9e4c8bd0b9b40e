//! Checkout session.
//!
//! A session walks one checkout attempt through
//! `CollectingDetails -> Reviewing -> Completed`. Submitting from review
//! renders the invoice, then notifies the store owner, then clears the cart.
//!
//! | outcome                       | step      | cart       |
//! |-------------------------------|-----------|------------|
//! | invoice failed                | Reviewing | untouched  |
//! | notification delivered/skipped| Completed | cleared    |
//! | notification failed           | Completed | untouched  |

pub mod invoice;
pub mod notify;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::instrument;
use twist_taste_core::{CartItem, CheckoutStep, OrderDetails, OrderDetailsError, Price};
use uuid::Uuid;

use crate::cart::CartStore;
use crate::error::{add_breadcrumb, capture};
use crate::storage::Durability;

pub use invoice::{HtmlInvoiceRenderer, InvoiceArtifact, InvoiceError, InvoiceNumber, InvoiceRenderer};
pub use notify::{LogNotifier, NotificationFields, Notifier, NotifyError, NotifyStatus};

/// Errors that stop a checkout step.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("incomplete details: {0}")]
    MissingDetails(#[from] OrderDetailsError),

    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: CheckoutStep,
        action: &'static str,
    },

    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Invoice(#[from] InvoiceError),
}

/// Snapshot of the cart and details at the moment of submission.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub details: OrderDetails,
    pub items: Vec<CartItem>,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

/// How the owner notification ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Delivered,
    Skipped,
    /// Delivery failed; the order still completed.
    Failed(String),
}

impl NotificationOutcome {
    /// Whether the cart may be cleared after this outcome.
    #[must_use]
    pub const fn allows_clearing_cart(&self) -> bool {
        matches!(self, Self::Delivered | Self::Skipped)
    }
}

impl From<Result<NotifyStatus, NotifyError>> for NotificationOutcome {
    fn from(result: Result<NotifyStatus, NotifyError>) -> Self {
        match result {
            Ok(NotifyStatus::Delivered) => Self::Delivered,
            Ok(NotifyStatus::Skipped) => Self::Skipped,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Result of a completed checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub attempt_id: Uuid,
    pub invoice: InvoiceArtifact,
    pub notification: NotificationOutcome,
    /// Whether the cart was emptied in memory.
    pub cart_cleared: bool,
    /// Whether the empty cart was saved. `Unchanged` when the cart was kept.
    pub cart_durability: Durability,
    pub total: Price,
}

/// One checkout attempt.
#[derive(Debug)]
pub struct CheckoutSession {
    attempt: Uuid,
    step: CheckoutStep,
    details: OrderDetails,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempt: Uuid::new_v4(),
            step: CheckoutStep::default(),
            details: OrderDetails::default(),
        }
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn details(&self) -> &OrderDetails {
        &self.details
    }

    #[must_use]
    pub const fn attempt_id(&self) -> Uuid {
        self.attempt
    }

    /// Replace the contact details.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] once the order is completed.
    pub fn update_details(&mut self, details: OrderDetails) -> Result<(), CheckoutError> {
        self.require_not(CheckoutStep::Completed, "edit details")?;
        self.details = details;
        Ok(())
    }

    /// Move from details entry to review.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingDetails`] naming the first empty
    /// required field, or [`CheckoutError::InvalidTransition`] outside
    /// details entry.
    #[instrument(skip(self), fields(attempt = %self.attempt))]
    pub fn proceed_to_review(&mut self) -> Result<(), CheckoutError> {
        self.require(CheckoutStep::CollectingDetails, "review the order")?;
        self.details.validate()?;
        self.step = CheckoutStep::Reviewing;
        add_breadcrumb("checkout", "Reviewing order", None);
        Ok(())
    }

    /// Return from review to details entry.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside review.
    pub fn back_to_details(&mut self) -> Result<(), CheckoutError> {
        self.require(CheckoutStep::Reviewing, "go back to details")?;
        self.step = CheckoutStep::CollectingDetails;
        Ok(())
    }

    /// Abandon or finish the attempt and start a fresh one.
    pub fn close(&mut self) {
        *self = Self::new();
    }

    /// Place the order.
    ///
    /// Holds `&mut self` until the invoice and the notification have both
    /// finished, so a session cannot submit twice concurrently.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`] outside review
    /// - [`CheckoutError::EmptyCart`] with nothing to order
    /// - [`CheckoutError::MissingDetails`] if details were blanked in review
    /// - [`CheckoutError::Invoice`] if the invoice could not be produced; the
    ///   session stays in review and the cart is untouched
    #[instrument(skip_all, fields(attempt = %self.attempt))]
    pub async fn submit<R, N>(
        &mut self,
        cart: &mut CartStore,
        renderer: &R,
        notifier: &N,
    ) -> Result<CheckoutReceipt, CheckoutError>
    where
        R: InvoiceRenderer,
        N: Notifier,
    {
        self.require(CheckoutStep::Reviewing, "submit the order")?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.details.validate()?;

        let order = PlacedOrder {
            details: self.details.clone(),
            items: cart.items().to_vec(),
            total: cart.total_price(),
            placed_at: Utc::now(),
        };
        add_breadcrumb("checkout", "Submitting order", None);

        let invoice = match renderer.render(&order).await {
            Ok(invoice) => invoice,
            Err(e) => {
                tracing::error!(error = %e, "Invoice generation failed");
                capture(&e);
                return Err(e.into());
            }
        };

        let fields = NotificationFields::new(&order.details, &order.items, order.total);
        let notification = NotificationOutcome::from(notifier.notify(&fields).await);

        let cart_cleared = notification.allows_clearing_cart();
        let cart_durability = if cart_cleared {
            cart.clear()
        } else {
            tracing::warn!(
                outcome = ?notification,
                "Order notification failed, keeping cart"
            );
            Durability::Unchanged
        };

        self.step = CheckoutStep::Completed;
        tracing::info!(
            invoice = %invoice.number,
            total = %order.total,
            cart_cleared,
            "Checkout completed"
        );

        Ok(CheckoutReceipt {
            attempt_id: self.attempt,
            invoice,
            notification,
            cart_cleared,
            cart_durability,
            total: order.total,
        })
    }

    fn require(&self, step: CheckoutStep, action: &'static str) -> Result<(), CheckoutError> {
        if self.step == step {
            Ok(())
        } else {
            Err(CheckoutError::InvalidTransition {
                from: self.step,
                action,
            })
        }
    }

    fn require_not(&self, step: CheckoutStep, action: &'static str) -> Result<(), CheckoutError> {
        if self.step == step {
            Err(CheckoutError::InvalidTransition {
                from: self.step,
                action,
            })
        } else {
            Ok(())
        }
    }
}
