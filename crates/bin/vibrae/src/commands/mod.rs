//! One module per screen of the client, each with its own clap arguments.

pub mod logs;
pub mod player;
pub mod routines;
pub mod scenes;
pub mod session;

use vibrae_adapter_ws_tungstenite::LiveError;
use vibrae_domain::error::VibraeError;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Domain(#[from] VibraeError),

    #[error("failed to read {0} from stdin")]
    Input(&'static str, #[source] std::io::Error),

    #[error("cannot open live updates")]
    Live(#[from] LiveError),

    #[error("failed to wait for ctrl-c")]
    Signal(#[source] std::io::Error),
}

pub type CommandResult = Result<(), CommandError>;
