//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod auth;
pub mod control;
pub mod logs;
pub mod routines;
pub mod scenes;

pub use auth::{AuthGateway, NoopSessionListener, SessionListener, TokenStore};
pub use control::PlayerControl;
pub use logs::LogSource;
pub use routines::RoutineRepository;
pub use scenes::SceneRepository;
