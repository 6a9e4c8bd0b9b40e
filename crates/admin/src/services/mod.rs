//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Passphrase authentication behind the [`auth::Authenticator`] seam

pub mod auth;

pub use auth::{AdminIdentity, AuthError, Authenticator, PassphraseAuthenticator};
