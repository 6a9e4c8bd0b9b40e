//! Twist & Taste Core - Shared types library.
//!
//! This crate provides common types used across all Twist & Taste components:
//! - `storefront` - Catalog, cart and checkout stores
//! - `admin` - Passphrase-gated catalog management
//! - `cli` - Command-line host for shoppers and the store owner
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, cart rows, order details and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
