//! File-backed [`TokenStore`].

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use vibrae_app::ports::TokenStore;
use vibrae_domain::error::VibraeError;
use vibrae_domain::session::AccessToken;

use crate::error::TokenStoreError;

/// `<config dir>/vibrae/token`, or `./.vibrae/token` when the platform has
/// no config directory.
#[must_use]
pub fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .map_or_else(|| PathBuf::from(".vibrae"), |dir| dir.join("vibrae"))
        .join("token")
}

/// Stores the bearer token as the whole content of one file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_private(&self, content: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(content.as_bytes())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // mode() only applies on creation; tighten files that already existed.
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AccessToken>, VibraeError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| AccessToken::new(token)))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TokenStoreError::Read {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }

    fn save(&self, token: &AccessToken) -> Result<(), VibraeError> {
        self.write_private(token.as_str())
            .map_err(|source| TokenStoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), VibraeError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "token removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TokenStoreError::Remove {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }
}
