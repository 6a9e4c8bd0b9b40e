//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! tt-cli checkout --name "Mariam" --phone 55512345 --address "Doha" --notes "Ring twice"
//! ```

use twist_taste_core::OrderDetails;
use twist_taste_storefront::Storefront;
use twist_taste_storefront::checkout::{CheckoutSession, NotificationOutcome};

use super::{cart, report};

/// Review the cart with `details` and place the order.
///
/// # Errors
///
/// Returns an error if the details are incomplete, the cart is empty, or the
/// invoice cannot be written.
pub async fn run(
    storefront: &mut Storefront,
    details: OrderDetails,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = CheckoutSession::new();
    session.update_details(details)?;
    session.proceed_to_review()?;

    tracing::info!("Reviewing order for {}", session.details().name.trim());
    cart::show(storefront);

    let receipt = storefront.submit(&mut session).await?;

    tracing::info!(
        "Order placed: invoice {} saved to {}",
        receipt.invoice.number,
        receipt.invoice.path.display()
    );
    match &receipt.notification {
        NotificationOutcome::Delivered => tracing::info!("The store has been notified"),
        NotificationOutcome::Skipped => {
            tracing::info!("Store notification is not configured; send the invoice to the store");
        }
        NotificationOutcome::Failed(reason) => tracing::warn!(
            "Could not notify the store ({reason}); your cart was kept so you can try again"
        ),
    }
    if receipt.cart_cleared {
        report(receipt.cart_durability);
    }
    tracing::info!("Total {}", receipt.total);

    session.close();
    Ok(())
}
