//! Twist & Taste admin library.
//!
//! Catalog administration for the store owner: an [`AdminSession`] gated by a
//! passphrase [`Authenticator`](services::auth::Authenticator), and an
//! [`AdminConsole`] for adding, editing, deleting and resetting products.
//!
//! # Security
//!
//! The passphrase gate keeps shoppers out of the editor on a shared device.
//! It is not a security boundary: anyone with access to the data directory
//! can edit the persisted catalog directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod console;
pub mod error;
pub mod form;
pub mod services;
pub mod session;

pub use config::AdminConfig;
pub use console::AdminConsole;
pub use error::AdminError;
pub use form::ProductForm;
pub use session::AdminSession;
