use clap::Args;
use vibrae_domain::session::{Credentials, NewAccount};

use super::CommandResult;
use crate::context::Context;
use crate::prompt::value_or_stdin;

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    username: String,
    /// Read from stdin when omitted.
    #[arg(long, env = "VIBRAE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    username: String,
    /// Read from stdin when omitted.
    #[arg(long, env = "VIBRAE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Read from stdin when omitted.
    #[arg(long)]
    repeat_password: Option<String>,
    /// Token the backend requires to create accounts.
    #[arg(long, env = "VIBRAE_ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,
}

pub async fn login(ctx: &Context, args: LoginArgs) -> CommandResult {
    let password = value_or_stdin(args.password, "password")?;
    let credentials = Credentials::new(&args.username, &password)?;
    ctx.session().login(&credentials).await?;
    println!("logged in as {}", credentials.username);
    Ok(())
}

pub fn logout(ctx: &Context) -> CommandResult {
    ctx.session().logout()?;
    println!("logged out");
    Ok(())
}

pub async fn register(ctx: &Context, args: RegisterArgs) -> CommandResult {
    let password = value_or_stdin(args.password, "password")?;
    let repeat = value_or_stdin(args.repeat_password, "repeat password")?;
    let admin_token = value_or_stdin(args.admin_token, "admin token")?;
    let account = NewAccount::new(&args.username, &password, &repeat, &admin_token)?;
    let created = ctx.session().create_account(&account).await?;
    println!("created account #{} ({})", created.id, created.username);
    Ok(())
}
