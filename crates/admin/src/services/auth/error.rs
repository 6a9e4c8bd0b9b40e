//! Admin authentication error types.

use thiserror::Error;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The passphrase did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The configured passphrase could not be hashed.
    #[error("password hashing error")]
    PasswordHash,

    /// An operation needed an unlocked session.
    #[error("admin session is locked")]
    Locked,
}
