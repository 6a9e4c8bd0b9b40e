//! Twist & Taste storefront library.
//!
//! The shopper-facing store logic: a product catalog that merges the built-in
//! defaults with the owner's customizations, a persisted shopping cart, and a
//! checkout session that produces an invoice and notifies the store.
//!
//! Everything persists through an injected [`storage::KeyValueStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod links;
pub mod state;
pub mod storage;

pub use cart::CartStore;
pub use catalog::CatalogStore;
pub use checkout::{CheckoutError, CheckoutReceipt, CheckoutSession};
pub use config::StorefrontConfig;
pub use error::StorefrontError;
pub use state::Storefront;
pub use storage::{Durability, FileStore, KeyValueStore, MemoryStore, StorageError};
