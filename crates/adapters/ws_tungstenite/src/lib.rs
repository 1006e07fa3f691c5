//! # vibrae-adapter-ws-tungstenite
//!
//! Live player updates over the backend push socket (`/control/ws`).
//!
//! [`LiveFeed::start`] spawns a task driving
//! [`LiveConnection`](vibrae_app::live::LiveConnection): it connects with the
//! stored token, forwards decoded [`PushMessage`](vibrae_domain::player::PushMessage)s
//! on a channel and reconnects after a fixed delay whenever the socket drops.

mod config;
mod endpoint;
mod error;
mod feed;

pub use config::WsConfig;
pub use endpoint::SocketEndpoint;
pub use error::LiveError;
pub use feed::LiveFeed;
