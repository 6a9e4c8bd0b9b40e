//! Invoice rendering.
//!
//! Invoices are rendered to HTML with askama and written into the download
//! directory as `TwistAndTaste_Invoice_<millis>.html`. Existing invoices are
//! never overwritten: a second order in the same millisecond gets a `_1`,
//! `_2`, ... suffix.

use std::fmt;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use askama::Template;
use thiserror::Error;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use twist_taste_core::{CartItem, Price};

use super::PlacedOrder;
use super::notify::NO_NOTES;

const FILE_PREFIX: &str = "TwistAndTaste_Invoice_";
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Errors raised while producing an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("failed to render invoice: {0}")]
    Template(#[from] askama::Error),

    #[error("failed to write invoice: {0}")]
    Io(#[from] std::io::Error),
}

/// Invoice number: `INV-` followed by the last six digits of the order
/// timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("INV-{:06}", millis.rem_euclid(1_000_000)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A written invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceArtifact {
    pub number: InvoiceNumber,
    pub path: PathBuf,
}

/// Produces an invoice document for a placed order.
pub trait InvoiceRenderer: Send + Sync {
    fn render(
        &self,
        order: &PlacedOrder,
    ) -> impl Future<Output = Result<InvoiceArtifact, InvoiceError>> + Send;
}

/// Invoice line view.
#[derive(Debug, Clone)]
pub struct InvoiceLineView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub total: String,
}

impl From<&CartItem> for InvoiceLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: Price::qar(item.product.price).to_string(),
            total: Price::qar(item.line_total()).to_string(),
        }
    }
}

/// Invoice template.
#[derive(Template)]
#[template(path = "invoice.html")]
pub struct InvoiceTemplate {
    pub number: String,
    pub date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub notes: String,
    pub lines: Vec<InvoiceLineView>,
    pub total: String,
}

impl InvoiceTemplate {
    #[must_use]
    pub fn new(order: &PlacedOrder, number: &InvoiceNumber) -> Self {
        Self {
            number: number.to_string(),
            date: order.placed_at.format("%Y-%m-%d").to_string(),
            customer_name: order.details.name.trim().to_owned(),
            customer_phone: order.details.phone.trim().to_owned(),
            customer_address: order.details.address.trim().to_owned(),
            notes: order.details.notes().unwrap_or(NO_NOTES).to_owned(),
            lines: order.items.iter().map(InvoiceLineView::from).collect(),
            total: order.total.to_string(),
        }
    }
}

/// Renders HTML invoices into a directory.
#[derive(Debug, Clone)]
pub struct HtmlInvoiceRenderer {
    out_dir: PathBuf,
}

impl HtmlInvoiceRenderer {
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Create a new invoice file for `millis`, adding a numeric suffix when
    /// the plain name is taken.
    async fn create_file(&self, millis: i64) -> std::io::Result<(File, PathBuf)> {
        let mut last_err = None;
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("{FILE_PREFIX}{millis}.html")
            } else {
                format!("{FILE_PREFIX}{millis}_{attempt}.html")
            };
            let path = self.out_dir.join(name);
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((file, path)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => last_err = Some(e),
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or_else(|| ErrorKind::AlreadyExists.into()))
    }
}

impl InvoiceRenderer for HtmlInvoiceRenderer {
    #[instrument(skip_all, fields(out_dir = %self.out_dir.display()))]
    async fn render(&self, order: &PlacedOrder) -> Result<InvoiceArtifact, InvoiceError> {
        let millis = order.placed_at.timestamp_millis();
        let number = InvoiceNumber::from_millis(millis);
        let html = InvoiceTemplate::new(order, &number).render()?;

        tokio::fs::create_dir_all(&self.out_dir).await?;
        let (mut file, path) = self.create_file(millis).await?;
        file.write_all(html.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(invoice = %number, path = %path.display(), "Invoice written");
        Ok(InvoiceArtifact { number, path })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use twist_taste_core::{OrderDetails, Product, ProductId};

    use super::*;

    fn order() -> PlacedOrder {
        let items = vec![CartItem::new(
            Product {
                id: ProductId::new(1),
                name: "Butter Croissant".to_string(),
                price: Decimal::from(12),
                description: String::new(),
                image: String::new(),
                category: String::new(),
            },
            3,
        )];
        PlacedOrder {
            details: OrderDetails {
                name: "Mariam".to_string(),
                phone: "55512345".to_string(),
                address: "Doha".to_string(),
                notes: None,
            },
            total: Price::qar(Decimal::from(36)),
            items,
            placed_at: Utc.timestamp_millis_opt(1_718_000_123_456).unwrap(),
        }
    }

    #[test]
    fn test_invoice_number_uses_last_six_digits() {
        assert_eq!(
            InvoiceNumber::from_millis(1_718_000_123_456).as_str(),
            "INV-123456"
        );
        assert_eq!(InvoiceNumber::from_millis(1_000_000_000_042).as_str(), "INV-000042");
    }

    #[test]
    fn test_template_renders_order() {
        let order = order();
        let html = InvoiceTemplate::new(&order, &InvoiceNumber::from_millis(123_456))
            .render()
            .unwrap();

        assert!(html.contains("INV-123456"));
        assert!(html.contains("Butter Croissant"));
        assert!(html.contains("12 ر.ق"));
        assert!(html.contains("36 ر.ق"));
        assert!(html.contains(NO_NOTES));
    }

    #[tokio::test]
    async fn test_renderer_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = HtmlInvoiceRenderer::new(dir.path().join("invoices"));

        let artifact = renderer.render(&order()).await.unwrap();

        assert_eq!(artifact.number.as_str(), "INV-123456");
        assert_eq!(
            artifact.path.file_name().unwrap().to_str().unwrap(),
            "TwistAndTaste_Invoice_1718000123456.html"
        );
        let html = std::fs::read_to_string(&artifact.path).unwrap();
        assert!(html.contains("Mariam"));
    }

    #[tokio::test]
    async fn test_same_millisecond_keeps_both_invoices() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = HtmlInvoiceRenderer::new(dir.path());

        let first = renderer.render(&order()).await.unwrap();
        let mut repeat = order();
        repeat.details.name = "Noor".to_string();
        let second = renderer.render(&repeat).await.unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(
            second.path.file_name().unwrap().to_str().unwrap(),
            "TwistAndTaste_Invoice_1718000123456_1.html"
        );
        assert!(std::fs::read_to_string(&first.path).unwrap().contains("Mariam"));
        assert!(std::fs::read_to_string(&second.path).unwrap().contains("Noor"));
    }
}
