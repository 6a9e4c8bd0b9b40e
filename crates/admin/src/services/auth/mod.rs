//! Admin authentication service.
//!
//! The admin panel is gated by a single shared passphrase. The configured
//! passphrase is hashed with Argon2id when the authenticator is built and only
//! the hash is kept in memory.
//!
//! This keeps casual visitors out of the catalog editor; it is not an identity
//! system. Swap in another [`Authenticator`] to put a real provider in front.

mod error;

pub use error::AuthError;

use std::fmt::Debug;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

/// Who unlocked the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub name: String,
}

/// Verifies admin credentials.
pub trait Authenticator: Send + Sync + Debug {
    /// Check a passphrase and return the identity it unlocks.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the passphrase is wrong.
    fn authenticate(&self, passphrase: &SecretString) -> Result<AdminIdentity, AuthError>;
}

/// Authenticator holding an Argon2 hash of one shared passphrase.
pub struct PassphraseAuthenticator {
    hash: String,
    identity: AdminIdentity,
}

impl Debug for PassphraseAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassphraseAuthenticator")
            .field("hash", &"[REDACTED]")
            .field("identity", &self.identity)
            .finish()
    }
}

impl PassphraseAuthenticator {
    /// Identity reported for a successful unlock.
    pub const DEFAULT_IDENTITY: &'static str = "admin";

    /// Hash `passphrase` and keep the hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub fn new(passphrase: &SecretString) -> Result<Self, AuthError> {
        Ok(Self {
            hash: hash_password(passphrase.expose_secret())?,
            identity: AdminIdentity {
                name: Self::DEFAULT_IDENTITY.to_string(),
            },
        })
    }
}

impl Authenticator for PassphraseAuthenticator {
    fn authenticate(&self, passphrase: &SecretString) -> Result<AdminIdentity, AuthError> {
        verify_password(passphrase.expose_secret(), &self.hash)?;
        Ok(self.identity.clone())
    }
}

/// Set the Sentry user context for an unlocked admin session.
pub fn set_sentry_user(identity: &AdminIdentity) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(identity.name.clone()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
