//! HTTP implementation of [`AuthGateway`] over `/users/`.

use std::future::Future;

use reqwest::Method;
use vibrae_app::ports::AuthGateway;
use vibrae_domain::error::VibraeError;
use vibrae_domain::session::{AccessToken, Account, Credentials, LoginResponse, NewAccount};

use crate::client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AuthGateway for HttpAuthGateway {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AccessToken, VibraeError>> + Send {
        let client = self.client.clone();
        let body = credentials.clone();
        async move {
            let response: LoginResponse = client.post_public("users/login", &body).await?;
            Ok(response.access_token)
        }
    }

    fn validate(&self) -> impl Future<Output = Result<(), VibraeError>> + Send {
        let client = self.client.clone();
        async move { Ok(client.send_empty(Method::POST, "users/validate", &[]).await?) }
    }

    fn create_account(
        &self,
        account: &NewAccount,
    ) -> impl Future<Output = Result<Account, VibraeError>> + Send {
        let client = self.client.clone();
        let body = account.clone();
        async move { Ok(client.post_public("users", &body).await?) }
    }
}
