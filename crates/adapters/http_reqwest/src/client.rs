//! The API gateway client shared by every HTTP port implementation.

use std::fmt;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;
use vibrae_app::ports::{SessionListener, TokenStore};
use vibrae_domain::session::AccessToken;

use crate::config::HttpConfig;
use crate::error::HttpError;

/// Bearer-authenticated client for the vibrae backend.
///
/// Cheap to clone: the connection pool, token store and listener are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    tokens: Arc<dyn TokenStore + Send + Sync>,
    listener: Arc<dyn SessionListener + Send + Sync>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`HttpError::Url`] if `base_url` does not parse and
    /// [`HttpError::NotABase`] if it cannot carry a path.
    pub fn new(
        config: &HttpConfig,
        tokens: Arc<dyn TokenStore + Send + Sync>,
        listener: Arc<dyn SessionListener + Send + Sync>,
    ) -> Result<Self, HttpError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base: parse_base(&config.base_url)?,
            tokens,
            listener,
        })
    }

    /// The backend base URL, always ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// The token store this client reads from.
    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore + Send + Sync> {
        &self.tokens
    }

    /// Resolve `path` (no leading slash) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Url`] when the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, HttpError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    /// The stored token, or invalidate the session when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Unauthenticated`] when no usable token is stored.
    pub fn bearer(&self) -> Result<AccessToken, HttpError> {
        match self.tokens.load().map_err(HttpError::Domain)? {
            Some(token) if !token.is_blank() => Ok(token),
            _ => {
                self.invalidate("no stored token");
                Err(HttpError::Unauthenticated)
            }
        }
    }

    /// Drop the stored token and tell the front end to go back to login.
    fn invalidate(&self, reason: &'static str) {
        tracing::warn!(reason, "session invalidated");
        if let Err(err) = self.tokens.clear() {
            tracing::warn!(error = %err, "failed to clear stored token");
        }
        self.listener.session_invalidated();
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, HttpError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%method, %url, "backend request");
        Ok(self.http.request(method, url))
    }

    /// Send with the bearer token attached.
    ///
    /// A 401 answer invalidates the session; any other non-success status
    /// becomes [`HttpError::Status`] with the backend's `detail` message.
    async fn send_authed(&self, request: RequestBuilder) -> Result<Response, HttpError> {
        let token = self.bearer()?;
        let response = request.bearer_auth(token.as_str()).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            self.invalidate("backend answered 401");
            return Err(HttpError::Unauthenticated);
        }
        check_status(response).await
    }

    async fn send_public(&self, request: RequestBuilder) -> Result<Response, HttpError> {
        let response = request.send().await?;
        check_status(response).await
    }

    /// # Errors
    ///
    /// See [`HttpError`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let request = self.request(Method::GET, path)?;
        Ok(self.send_authed(request).await?.json().await?)
    }

    /// # Errors
    ///
    /// See [`HttpError`].
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        Ok(self.send_authed(request).await?.json().await?)
    }

    /// # Errors
    ///
    /// See [`HttpError`].
    pub async fn get_text_with_query<Q>(&self, path: &str, query: &Q) -> Result<String, HttpError>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        Ok(self.send_authed(request).await?.text().await?)
    }

    /// # Errors
    ///
    /// See [`HttpError`].
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path)?.json(body);
        Ok(self.send_authed(request).await?.json().await?)
    }

    /// Authenticated call whose response body is ignored.
    ///
    /// # Errors
    ///
    /// See [`HttpError`].
    pub async fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), HttpError> {
        let mut request = self.request(method, path)?;
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send_authed(request).await?;
        Ok(())
    }

    /// Authenticated `POST` without a body, decoding the JSON answer.
    ///
    /// # Errors
    ///
    /// See [`HttpError`].
    pub async fn post_for_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let request = self.request(Method::POST, path)?;
        Ok(self.send_authed(request).await?.json().await?)
    }

    /// Unauthenticated `POST` with a JSON body (login, registration).
    ///
    /// # Errors
    ///
    /// See [`HttpError`]; a 401 here is a [`HttpError::Status`] and does not
    /// touch the stored session.
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        Ok(self.send_public(request).await?.json().await?)
    }

    /// Unauthenticated `GET` decoding a JSON answer.
    ///
    /// # Errors
    ///
    /// See [`HttpError`].
    pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let request = self.request(Method::GET, path)?;
        Ok(self.send_public(request).await?.json().await?)
    }
}

fn parse_base(raw: &str) -> Result<Url, HttpError> {
    let mut base = Url::parse(raw.trim())?;
    if base.cannot_be_a_base() {
        return Err(HttpError::NotABase(raw.to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

async fn check_status(response: Response) -> Result<Response, HttpError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = error_detail(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    tracing::debug!(status = status.as_u16(), %detail, "backend error");
    Err(HttpError::Status {
        status: status.as_u16(),
        detail,
    })
}

/// The backend reports failures as `{"detail": ...}`; validation failures
/// carry a list instead of a string.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
