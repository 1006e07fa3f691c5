//! Token store error types.

use std::path::PathBuf;

use vibrae_domain::error::VibraeError;

#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("failed to read token file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write token file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove token file {path}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<TokenStoreError> for VibraeError {
    fn from(err: TokenStoreError) -> Self {
        Self::Backend(Box::new(err))
    }
}
