//! Authentication ports: the `/users/` endpoints, token persistence and the
//! "session is gone" signal.

use std::future::Future;

use vibrae_domain::error::VibraeError;
use vibrae_domain::session::{AccessToken, Account, Credentials, NewAccount};

pub trait AuthGateway {
    /// Exchange credentials for a bearer token.
    ///
    /// A rejected login surfaces the server's `detail` message, not
    /// [`VibraeError::Unauthenticated`].
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AccessToken, VibraeError>> + Send;

    /// Check the stored token with the backend.
    fn validate(&self) -> impl Future<Output = Result<(), VibraeError>> + Send;

    fn create_account(
        &self,
        account: &NewAccount,
    ) -> impl Future<Output = Result<Account, VibraeError>> + Send;
}

/// Where the bearer token lives between runs.
///
/// Synchronous and object-safe so one store can be shared as
/// `Arc<dyn TokenStore + Send + Sync>` by every adapter.
pub trait TokenStore {
    /// # Errors
    ///
    /// Returns [`VibraeError::Backend`] when the underlying storage fails.
    fn load(&self) -> Result<Option<AccessToken>, VibraeError>;

    /// # Errors
    ///
    /// Returns [`VibraeError::Backend`] when the underlying storage fails.
    fn save(&self, token: &AccessToken) -> Result<(), VibraeError>;

    /// Remove the token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`VibraeError::Backend`] when the underlying storage fails.
    fn clear(&self) -> Result<(), VibraeError>;
}

/// Notified when the session ends involuntarily (missing token or a 401),
/// so the front end can send the user back to login.
pub trait SessionListener {
    fn session_invalidated(&self);
}

/// A listener that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionListener;

impl SessionListener for NoopSessionListener {
    fn session_invalidated(&self) {}
}
