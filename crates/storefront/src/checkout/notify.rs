//! Outbound order notification.
//!
//! The store owner is told about each order through a flat set of string
//! fields. Delivery itself is pluggable; the shipped [`LogNotifier`] records
//! the notification in the application log.

use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use twist_taste_core::{CartItem, OrderDetails, Price};

/// Text used when the shopper left no notes.
pub const NO_NOTES: &str = "لا يوجد ملاحظات";

/// Errors raised while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// What happened to a notification that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStatus {
    Delivered,
    /// No destination is configured.
    Skipped,
}

/// The fields of an order notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationFields {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    /// `"<name> (<qty>x)"` per row, comma separated.
    pub order_details: String,
    pub order_total: String,
    pub order_notes: String,
}

impl NotificationFields {
    #[must_use]
    pub fn new(details: &OrderDetails, items: &[CartItem], total: Price) -> Self {
        let order_details = items
            .iter()
            .map(|item| format!("{} ({}x)", item.product.name, item.quantity))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            customer_name: details.name.trim().to_owned(),
            customer_phone: details.phone.trim().to_owned(),
            customer_address: details.address.trim().to_owned(),
            order_details,
            order_total: total.to_string(),
            order_notes: details.notes().unwrap_or(NO_NOTES).to_owned(),
        }
    }
}

/// Delivers order notifications to the store owner.
pub trait Notifier: Send + Sync {
    /// Attempt delivery.
    ///
    /// Returns [`NotifyStatus::Skipped`] rather than an error when delivery is
    /// not configured.
    fn notify(
        &self,
        fields: &NotificationFields,
    ) -> impl Future<Output = Result<NotifyStatus, NotifyError>> + Send;
}

/// Notifier that writes each order to the log under a fixed destination.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    destination: Option<String>,
}

impl LogNotifier {
    #[must_use]
    pub const fn new(destination: Option<String>) -> Self {
        Self { destination }
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}

impl Notifier for LogNotifier {
    async fn notify(&self, fields: &NotificationFields) -> Result<NotifyStatus, NotifyError> {
        let Some(destination) = self.destination.as_deref() else {
            tracing::debug!("No notification destination configured, skipping");
            return Ok(NotifyStatus::Skipped);
        };

        tracing::info!(
            destination,
            customer_name = %fields.customer_name,
            customer_phone = %fields.customer_phone,
            customer_address = %fields.customer_address,
            order_details = %fields.order_details,
            order_total = %fields.order_total,
            order_notes = %fields.order_notes,
            "Order notification"
        );
        Ok(NotifyStatus::Delivered)
    }
}
