//! Core types for Twist & Taste.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use order::{OrderDetails, OrderDetailsError};
pub use price::{CurrencyCode, Price};
pub use product::{CartItem, NewProduct, Product};
pub use status::*;
