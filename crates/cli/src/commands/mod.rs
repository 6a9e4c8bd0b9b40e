//! Command handlers.
//!
//! Handlers report through `tracing` rather than printing, so output honours
//! `RUST_LOG` and reaches Sentry as breadcrumbs.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;

use twist_taste_storefront::Durability;

/// Message for a change that will not survive the run, if the user needs one.
fn warning(durability: Durability) -> Option<&'static str> {
    durability
        .needs_warning()
        .then_some("This change could not be saved and will be lost when the program exits")
}

/// Tell the user when a change could not be saved.
fn report(durability: Durability) {
    if let Some(message) = warning(durability) {
        tracing::warn!("{message}");
    } else if durability == Durability::Unchanged {
        tracing::info!("Nothing changed");
    }
}
