//! HTTP adapter error types.

use vibrae_domain::error::VibraeError;

/// Errors specific to the HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The configured base URL or a derived endpoint is not a valid URL.
    #[error("invalid backend url")]
    Url(#[from] url::ParseError),

    /// The URL cannot carry path segments (e.g. `mailto:`).
    #[error("backend url `{0}` cannot be used as a base")]
    NotABase(String),

    /// Connection, TLS or body decoding failure.
    #[error("request failed")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{detail} (HTTP {status})")]
    Status { status: u16, detail: String },

    /// No token stored, or the backend answered 401.
    #[error("not authenticated")]
    Unauthenticated,

    /// A domain-level error (e.g. from the token store).
    #[error("domain error")]
    Domain(#[source] VibraeError),
}

impl HttpError {
    /// Convert into a [`VibraeError`] for propagation across port boundaries.
    pub fn into_domain(self) -> VibraeError {
        match self {
            Self::Unauthenticated => VibraeError::Unauthenticated,
            Self::Domain(err) => err,
            other => VibraeError::Backend(Box::new(other)),
        }
    }
}

impl From<HttpError> for VibraeError {
    fn from(err: HttpError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_unauthenticated_to_domain_unauthenticated() {
        let err: VibraeError = HttpError::Unauthenticated.into();
        assert!(matches!(err, VibraeError::Unauthenticated));
    }

    #[test]
    fn should_map_status_to_backend_error_keeping_detail() {
        let err: VibraeError = HttpError::Status {
            status: 400,
            detail: "Username already exists".to_string(),
        }
        .into();
        match err {
            VibraeError::Backend(source) => {
                assert_eq!(source.to_string(), "Username already exists (HTTP 400)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn should_convert_domain_error_back_to_domain() {
        let domain_err =
            VibraeError::Validation(vibrae_domain::error::ValidationError::EmptyName);
        let back: VibraeError = HttpError::Domain(domain_err).into();
        assert!(matches!(back, VibraeError::Validation(_)));
    }

    #[test]
    fn should_display_url_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        assert_eq!(HttpError::Url(parse_err).to_string(), "invalid backend url");
    }
}
