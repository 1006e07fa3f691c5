//! # vibrae-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RoutineRepository`: CRUD for routines on the backend
//!   - `SceneRepository`: CRUD for scenes plus the music folder listing
//!   - `PlayerControl`: stop, resume, volume and now-playing queries
//!   - `LogSource`: log index, per-log history and tailed content
//!   - `AuthGateway`: login, token validation, account creation
//!   - `TokenStore` / `SessionListener`: token persistence and invalidation signal
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RoutineService`, `SceneService`: cached lists refreshed after every mutation
//!   - `ControlService`, `LogService`, `SessionService`
//! - Provide the **live connection state machine** driven by the WebSocket adapter
//!
//! ## Dependency rule
//! Depends on `vibrae-domain` only (plus `tokio::sync` for caches).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod live;
pub mod ports;
pub mod services;
