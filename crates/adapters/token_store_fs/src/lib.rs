//! # vibrae-adapter-token-store-fs
//!
//! Token persistence for the vibrae client.
//!
//! ## Responsibilities
//! - [`FileTokenStore`]: the bearer token in a single file readable only by
//!   its owner (mode `0600` on Unix), under the user's config directory
//! - [`MemoryTokenStore`]: process-local store for tests and one-shot runs
//! - Both implement `vibrae_app::ports::TokenStore`
//!
//! ## Dependency rule
//! Depends on `vibrae-app` (for port traits) and `vibrae-domain` (for domain types).

pub mod error;
pub mod file;
pub mod memory;

pub use error::TokenStoreError;
pub use file::{FileTokenStore, default_token_path};
pub use memory::MemoryTokenStore;
