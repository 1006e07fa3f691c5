//! Socket URL derived from the HTTP base URL.

use url::Url;
use vibrae_domain::session::AccessToken;

use crate::error::LiveError;

const SOCKET_PATH: &str = "control/ws";

/// The push socket address, without credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketEndpoint {
    url: Url,
}

impl SocketEndpoint {
    /// Derive `ws(s)://<host>/<prefix>/control/ws` from the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::Scheme`] when the base is neither `http` nor
    /// `https`.
    pub fn from_api_base(base: &Url) -> Result<Self, LiveError> {
        let scheme = match base.scheme() {
            "http" => "ws",
            "https" => "wss",
            other => return Err(LiveError::Scheme(other.to_string())),
        };
        let mut root = base.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        let mut url = root.join(SOCKET_PATH)?;
        url.set_query(None);
        url.set_fragment(None);
        url.set_scheme(scheme)
            .map_err(|()| LiveError::Scheme(base.scheme().to_string()))?;
        Ok(Self { url })
    }

    /// The address to connect to, carrying `token` as a query parameter.
    #[must_use]
    pub fn with_token(&self, token: &AccessToken) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair("token", token.as_str());
        url
    }

    /// The address without credentials, safe to log.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}
