//! Session service: login, logout, token validation and registration.

use std::sync::Arc;

use vibrae_domain::error::VibraeError;
use vibrae_domain::session::{Account, Credentials, NewAccount};

use crate::ports::{AuthGateway, TokenStore};

pub struct SessionService<A> {
    gateway: A,
    tokens: Arc<dyn TokenStore + Send + Sync>,
}

impl<A: AuthGateway> SessionService<A> {
    pub fn new(gateway: A, tokens: Arc<dyn TokenStore + Send + Sync>) -> Self {
        Self { gateway, tokens }
    }

    /// Log in and persist the issued token.
    ///
    /// # Errors
    ///
    /// Returns a backend error carrying the server's message when the
    /// credentials are rejected, or a storage error if the token cannot be
    /// saved.
    #[tracing::instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<(), VibraeError> {
        let token = self.gateway.login(credentials).await?;
        self.tokens.save(&token)?;
        tracing::info!("logged in");
        Ok(())
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the token cannot be removed.
    pub fn logout(&self) -> Result<(), VibraeError> {
        self.tokens.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Check that a token is stored and still accepted by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`VibraeError::Unauthenticated`] when no token is stored or
    /// the backend rejects it.
    pub async fn validate(&self) -> Result<(), VibraeError> {
        if self.tokens.load()?.is_none_or(|t| t.is_blank()) {
            return Err(VibraeError::Unauthenticated);
        }
        self.gateway.validate().await
    }

    /// Register a new account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns a backend error carrying the server's message, e.g. for an
    /// invalid admin token or an existing username.
    #[tracing::instrument(skip(self, account), fields(username = %account.username))]
    pub async fn create_account(&self, account: &NewAccount) -> Result<Account, VibraeError> {
        let created = self.gateway.create_account(account).await?;
        tracing::info!(id = created.id, "account created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;
    use vibrae_domain::session::AccessToken;

    #[derive(Default)]
    struct MemoryTokens(Mutex<Option<AccessToken>>);

    impl TokenStore for MemoryTokens {
        fn load(&self) -> Result<Option<AccessToken>, VibraeError> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn save(&self, token: &AccessToken) -> Result<(), VibraeError> {
            *self.0.lock().unwrap() = Some(token.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), VibraeError> {
            *self.0.lock().unwrap() = None;
            Ok(())
        }
    }

    struct FakeGateway {
        accept: bool,
    }

    impl AuthGateway for FakeGateway {
        fn login(
            &self,
            credentials: &Credentials,
        ) -> impl Future<Output = Result<AccessToken, VibraeError>> + Send {
            let result = if self.accept {
                Ok(AccessToken::new(format!("token-for-{}", credentials.username)))
            } else {
                Err(VibraeError::Backend("Login no válido".into()))
            };
            async { result }
        }

        fn validate(&self) -> impl Future<Output = Result<(), VibraeError>> + Send {
            let accept = self.accept;
            async move {
                if accept {
                    Ok(())
                } else {
                    Err(VibraeError::Unauthenticated)
                }
            }
        }

        fn create_account(
            &self,
            account: &NewAccount,
        ) -> impl Future<Output = Result<Account, VibraeError>> + Send {
            let created = Account {
                id: 7,
                username: account.username.clone(),
            };
            async { Ok(created) }
        }
    }

    fn make_service(accept: bool) -> (SessionService<FakeGateway>, Arc<MemoryTokens>) {
        let tokens = Arc::new(MemoryTokens::default());
        let svc = SessionService::new(FakeGateway { accept }, tokens.clone());
        (svc, tokens)
    }

    #[tokio::test]
    async fn should_store_token_after_login() {
        let (svc, tokens) = make_service(true);
        svc.login(&Credentials::new("ana", "pw").unwrap())
            .await
            .unwrap();
        assert_eq!(
            tokens.load().unwrap().unwrap().as_str(),
            "token-for-ana"
        );
    }

    #[tokio::test]
    async fn should_surface_server_message_on_rejected_login() {
        let (svc, tokens) = make_service(false);
        let err = svc
            .login(&Credentials::new("ana", "bad").unwrap())
            .await
            .unwrap_err();
        match err {
            VibraeError::Backend(source) => assert_eq!(source.to_string(), "Login no válido"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(tokens.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn should_clear_token_on_logout() {
        let (svc, tokens) = make_service(true);
        tokens.save(&AccessToken::new("t")).unwrap();
        svc.logout().unwrap();
        assert!(tokens.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn should_fail_validation_without_token() {
        let (svc, _) = make_service(true);
        assert!(matches!(
            svc.validate().await,
            Err(VibraeError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn should_validate_stored_token_with_backend() {
        let (svc, tokens) = make_service(true);
        tokens.save(&AccessToken::new("t")).unwrap();
        svc.validate().await.unwrap();

        let (rejecting, tokens) = make_service(false);
        tokens.save(&AccessToken::new("t")).unwrap();
        assert!(matches!(
            rejecting.validate().await,
            Err(VibraeError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn should_create_account() {
        let (svc, _) = make_service(true);
        let account = NewAccount::new("bea", "pw", "pw", "admin").unwrap();
        let created = svc.create_account(&account).await.unwrap();
        assert_eq!(created.username, "bea");
    }
}
