//! In-memory [`TokenStore`].

use std::sync::{Mutex, PoisonError};

use vibrae_app::ports::TokenStore;
use vibrae_domain::error::VibraeError;
use vibrae_domain::session::AccessToken;

/// Keeps the token for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AccessToken>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AccessToken>, VibraeError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &AccessToken) -> Result<(), VibraeError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), VibraeError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
