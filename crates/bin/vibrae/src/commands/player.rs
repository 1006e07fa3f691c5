use chrono::Local;
use clap::Args;
use vibrae_adapter_ws_tungstenite::LiveFeed;
use vibrae_domain::player::{PlayerStatus, PushMessage, Volume};

use super::{CommandError, CommandResult};
use crate::context::Context;
use crate::render;

#[derive(Debug, Args)]
pub struct VolumeArgs {
    /// New level in 0..=100; fractional slider values are rounded.
    /// Prints the current level when omitted.
    level: Option<f64>,
}

pub async fn status(ctx: &Context) -> CommandResult {
    let control = ctx.control();
    let backend = control.status().await?;
    println!(
        "backend: {} (player {}, scheduler {})",
        backend.status, backend.details.player, backend.details.scheduler
    );

    let playing = control.now_playing().await?;
    let volume = control.volume().await?;
    let mut state = PlayerStatus::default();
    state.apply(&PushMessage::NowPlaying {
        now_playing: playing.now_playing,
    });
    state.apply(&PushMessage::Volume {
        volume: volume.get(),
    });
    println!("{}", render::player(&state));

    if state.now_playing.is_none() {
        let routines = ctx.routines();
        let now = Local::now().naive_local();
        if control.should_be_playing(&routines, now).await? {
            if let Some(routine) = routines.active_now(now).await {
                println!(
                    "routine #{} ({}-{}) should be playing; run `vibrae resume`",
                    routine.id, routine.start_time, routine.end_time
                );
            }
        }
    }
    Ok(())
}

/// Follow now-playing and volume pushes until ctrl-c.
pub async fn watch(ctx: &Context) -> CommandResult {
    // Fail fast instead of reconnecting forever with a rejected token.
    ctx.session().validate().await?;

    let endpoint = ctx.socket_endpoint()?;
    let (feed, mut updates) = LiveFeed::start(endpoint, &ctx.config.live, ctx.tokens());
    let mut state = PlayerStatus::default();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(message) => {
                    if state.apply(&message) {
                        println!("{}", render::player(&state));
                    }
                }
                None => break Ok(()),
            },
            result = &mut ctrl_c => break result.map_err(CommandError::Signal),
        }
    };
    feed.stop().await;
    outcome
}

pub async fn stop(ctx: &Context) -> CommandResult {
    ctx.control().stop().await?;
    println!("stopped");
    Ok(())
}

pub async fn resume(ctx: &Context) -> CommandResult {
    ctx.control().resume().await?;
    println!("resumed");
    Ok(())
}

pub async fn volume(ctx: &Context, args: VolumeArgs) -> CommandResult {
    let control = ctx.control();
    match args.level {
        Some(position) => {
            let volume = Volume::from_slider(position)?;
            control.set_volume(volume).await?;
            println!("volume set to {volume}");
        }
        None => println!("volume {}", control.volume().await?),
    }
    Ok(())
}
