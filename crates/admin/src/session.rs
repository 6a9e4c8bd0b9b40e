//! Admin session gate.

use secrecy::SecretString;
use tracing::instrument;
use twist_taste_storefront::CatalogStore;

use crate::console::AdminConsole;
use crate::services::auth::{
    AdminIdentity, AuthError, Authenticator, clear_sentry_user, set_sentry_user,
};

/// Locked/unlocked state of the admin panel.
///
/// The catalog console is only reachable through an unlocked session.
#[derive(Debug)]
pub struct AdminSession<A> {
    authenticator: A,
    identity: Option<AdminIdentity>,
}

impl<A: Authenticator> AdminSession<A> {
    /// Start a locked session.
    pub const fn new(authenticator: A) -> Self {
        Self {
            authenticator,
            identity: None,
        }
    }

    /// Try to unlock with `passphrase`. A failed attempt leaves the session
    /// locked.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the passphrase is wrong.
    #[instrument(skip_all)]
    pub fn unlock(&mut self, passphrase: &SecretString) -> Result<&AdminIdentity, AuthError> {
        match self.authenticator.authenticate(passphrase) {
            Ok(identity) => {
                tracing::info!(admin = %identity.name, "Admin session unlocked");
                set_sentry_user(&identity);
                Ok(self.identity.insert(identity))
            }
            Err(e) => {
                self.identity = None;
                tracing::warn!("Admin unlock rejected");
                Err(e)
            }
        }
    }

    /// Lock the session again.
    pub fn lock(&mut self) {
        if self.identity.take().is_some() {
            clear_sentry_user();
            tracing::info!("Admin session locked");
        }
    }

    #[must_use]
    pub const fn is_unlocked(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&AdminIdentity> {
        self.identity.as_ref()
    }

    /// Open the catalog console.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Locked` if the session has not been unlocked.
    pub fn console<'a>(
        &'a self,
        catalog: &'a mut CatalogStore,
    ) -> Result<AdminConsole<'a>, AuthError> {
        let identity = self.identity.as_ref().ok_or(AuthError::Locked)?;
        Ok(AdminConsole::new(identity, catalog))
    }
}
