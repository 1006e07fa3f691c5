use clap::Subcommand;
use vibrae_domain::logs::LogSelection;

use super::CommandResult;
use crate::context::Context;
use crate::render;

#[derive(Debug, Subcommand)]
pub enum LogsAction {
    /// List current and rotated log files
    List,
    /// Print the tail of a log file
    Show {
        file: String,
        /// The file is a rotated one.
        #[arg(long)]
        history: bool,
        /// Number of lines; the configured default when omitted or not positive.
        #[arg(long, allow_negative_numbers = true)]
        tail: Option<i64>,
        /// Only error and critical entries with their stack lines.
        #[arg(long)]
        errors: bool,
    },
    /// List the rotated files of a log
    History {
        file: String,
        #[arg(long)]
        history: bool,
    },
}

fn selection(file: String, history: bool) -> LogSelection {
    if history {
        LogSelection::rotated(file)
    } else {
        LogSelection::current(file)
    }
}

pub async fn run(ctx: &Context, action: LogsAction) -> CommandResult {
    let logs = ctx.logs();
    match action {
        LogsAction::List => {
            let index = logs.index().await?;
            println!("current:");
            for file in &index.current {
                println!("  {}", render::log_file(file));
            }
            println!("history:");
            for file in &index.history {
                println!("  {}", render::log_file(file));
            }
        }
        LogsAction::Show {
            file,
            history,
            tail,
            errors,
        } => {
            let tail = tail
                .filter(|n| *n > 0)
                .or(Some(i64::from(ctx.config.logs.default_tail)));
            let text = logs.content(&selection(file, history), tail).await?;
            println!("{}", render::log_text(&text, errors));
        }
        LogsAction::History { file, history } => {
            let found = logs.history_for(&selection(file, history)).await?;
            println!("{}:", found.base);
            if found.history.is_empty() {
                println!("  no rotated files");
            }
            for file in &found.history {
                println!("  {}", render::log_file(file));
            }
        }
    }
    Ok(())
}
