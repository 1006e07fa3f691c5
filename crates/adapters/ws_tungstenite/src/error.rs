//! WebSocket adapter error types.

use vibrae_domain::error::VibraeError;

#[derive(Debug, thiserror::Error)]
pub enum LiveError {
    #[error("invalid socket url")]
    Url(#[from] url::ParseError),

    /// Only `http` and `https` backends can be upgraded to a socket.
    #[error("unsupported backend scheme `{0}`")]
    Scheme(String),

    #[error("socket failure")]
    Socket(#[source] Box<tokio_tungstenite::tungstenite::Error>),
}

impl From<tokio_tungstenite::tungstenite::Error> for LiveError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Socket(Box::new(err))
    }
}

impl LiveError {
    /// Convert into a [`VibraeError`] for propagation across port boundaries.
    pub fn into_domain(self) -> VibraeError {
        VibraeError::Backend(Box::new(self))
    }
}

impl From<LiveError> for VibraeError {
    fn from(err: LiveError) -> Self {
        err.into_domain()
    }
}
