//! # vibrae, the garden music client
//!
//! Composition root that wires the adapters together and exposes every
//! screen of the client as a subcommand.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Install the tracing subscriber (stderr, so stdout stays scriptable)
//! - Construct the backend client and token store (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Map failures to exit codes: 2 when the session is missing or expired,
//!   1 for everything else
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod commands;
mod config;
mod context;
mod prompt;
mod render;

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vibrae_domain::error::VibraeError;

use crate::commands::CommandError;
use crate::config::Config;
use crate::context::Context;

#[derive(Parser)]
#[command(name = "vibrae", version, about = "Control the garden music from a terminal")]
struct Cli {
    /// Configuration file (default: ./vibrae.toml when present).
    #[arg(long, global = true, env = "VIBRAE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login(commands::session::LoginArgs),
    /// Forget the stored session token
    Logout,
    /// Create an account (requires the admin token)
    Register(commands::session::RegisterArgs),
    /// Backend health, now playing and volume
    Status,
    /// Follow live now-playing and volume updates
    Watch,
    /// Stop playback
    Stop,
    /// Resume the scheduled playback
    Resume,
    /// Show or set the volume
    Volume(commands::player::VolumeArgs),
    /// Routine management
    Routines {
        #[command(subcommand)]
        action: commands::routines::RoutinesAction,
    },
    /// Scene management
    Scenes {
        #[command(subcommand)]
        action: commands::scenes::ScenesAction,
    },
    /// Backend log files
    Logs {
        #[command(subcommand)]
        action: commands::logs::LogsAction,
    },
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("invalid log filter `{filter}`"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)
}

fn bootstrap(config_path: Option<&std::path::Path>) -> anyhow::Result<Context> {
    let config = Config::load(config_path).context("failed to load configuration")?;
    init_tracing(&config.logging.filter)?;
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");
    Context::new(config).context("failed to set up the backend client")
}

async fn dispatch(ctx: &Context, command: Commands) -> Result<(), CommandError> {
    match command {
        Commands::Login(args) => commands::session::login(ctx, args).await,
        Commands::Logout => commands::session::logout(ctx),
        Commands::Register(args) => commands::session::register(ctx, args).await,
        Commands::Status => commands::player::status(ctx).await,
        Commands::Watch => commands::player::watch(ctx).await,
        Commands::Stop => commands::player::stop(ctx).await,
        Commands::Resume => commands::player::resume(ctx).await,
        Commands::Volume(args) => commands::player::volume(ctx, args).await,
        Commands::Routines { action } => commands::routines::run(ctx, action).await,
        Commands::Scenes { action } => commands::scenes::run(ctx, action).await,
        Commands::Logs { action } => commands::logs::run(ctx, action).await,
    }
}

fn report(err: &CommandError) -> ExitCode {
    if matches!(err, CommandError::Domain(VibraeError::Unauthenticated)) {
        eprintln!("error: not logged in or session expired; run `vibrae login`");
        return ExitCode::from(2);
    }
    // Backend errors carry the server's `detail` in their source chain.
    let (mut message, mut source): (String, Option<&dyn std::error::Error>) = match err {
        CommandError::Domain(VibraeError::Validation(inner)) => (inner.to_string(), None),
        CommandError::Domain(VibraeError::NotFound(inner)) => (inner.to_string(), None),
        CommandError::Domain(VibraeError::Backend(inner)) => (
            "backend error".to_string(),
            Some(&**inner as &dyn std::error::Error),
        ),
        other => (other.to_string(), other.source()),
    };
    while let Some(cause) = source {
        message = format!("{message}: {cause}");
        source = cause.source();
    }
    eprintln!("error: {message}");
    ExitCode::FAILURE
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let ctx = match bootstrap(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    match dispatch(&ctx, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            report(&err)
        }
    }
}
