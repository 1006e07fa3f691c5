//! # vibrae-adapter-http-reqwest
//!
//! HTTP adapter for the vibrae backend using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - [`ApiClient`]: bearer-token injection on every authenticated call, and
//!   session invalidation (token cleared, listener notified) when no token is
//!   stored or the backend answers 401
//! - Implement the port traits defined in `vibrae-app::ports` on top of it
//! - Map between backend JSON bodies and domain types
//!
//! ## Dependency rule
//! Depends on `vibrae-app` (for port traits) and `vibrae-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod auth;
pub mod client;
pub mod config;
pub mod control;
pub mod error;
pub mod logs;
pub mod routines;
pub mod scenes;

pub use auth::HttpAuthGateway;
pub use client::ApiClient;
pub use config::HttpConfig;
pub use control::HttpPlayerControl;
pub use error::HttpError;
pub use logs::HttpLogSource;
pub use routines::HttpRoutineRepository;
pub use scenes::HttpSceneRepository;
