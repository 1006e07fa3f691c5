//! Application services: use-case orchestration over port traits.

pub mod control_service;
pub mod log_service;
pub mod routine_service;
pub mod scene_service;
pub mod session_service;

pub use control_service::ControlService;
pub use log_service::LogService;
pub use routine_service::RoutineService;
pub use scene_service::SceneService;
pub use session_service::SessionService;
