use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use vibrae_domain::activity::is_active_now;
use vibrae_domain::calendar::representative_week;
use vibrae_domain::error::{NotFoundError, VibraeError};
use vibrae_domain::id::{RoutineId, SceneId};
use vibrae_domain::routine::RoutineDraft;
use vibrae_domain::scene::scene_name;

use super::CommandResult;
use crate::context::Context;
use crate::render;

#[derive(Debug, Subcommand)]
pub enum RoutinesAction {
    /// List routines, marking the one active now
    List,
    /// Create a routine
    Add(AddArgs),
    /// Change some fields of a routine
    Edit(EditArgs),
    /// Delete a routine
    Delete { id: i64 },
    /// Create a copy of a routine
    Duplicate { id: i64 },
    /// Show the representative week of a month
    Week {
        /// Month as `YYYY-MM`; the current month when omitted.
        #[arg(long, value_parser = parse_month)]
        month: Option<NaiveDate>,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    scene: i64,
    /// Start time, `HH:MM`.
    #[arg(long)]
    start: String,
    /// End time, `HH:MM`; at or before the start means overnight.
    #[arg(long)]
    end: String,
    /// Weekday tokens (`mon`..`sun`); every day when omitted.
    #[arg(long, value_delimiter = ',')]
    days: Vec<String>,
    /// Month tokens (`jan`..`dec`); every month when omitted.
    #[arg(long, value_delimiter = ',')]
    months: Vec<String>,
    /// Playback volume, 50 when omitted.
    #[arg(long)]
    volume: Option<i64>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    id: i64,
    #[arg(long)]
    scene: Option<i64>,
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    end: Option<String>,
    #[arg(long, value_delimiter = ',', conflicts_with = "every_day")]
    days: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',', conflicts_with = "every_month")]
    months: Option<Vec<String>>,
    /// Drop the weekday filter.
    #[arg(long)]
    every_day: bool,
    /// Drop the month filter.
    #[arg(long)]
    every_month: bool,
    #[arg(long)]
    volume: Option<i64>,
}

fn parse_month(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| format!("`{raw}` is not a YYYY-MM month"))
}

fn tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_draft(
    scene: SceneId,
    start: String,
    end: String,
    days: Vec<String>,
    months: Vec<String>,
    volume: Option<i64>,
) -> Result<RoutineDraft, VibraeError> {
    let mut builder = RoutineDraft::builder()
        .scene_id(scene)
        .start_time(start)
        .end_time(end);
    for day in days {
        builder = builder.weekday(day);
    }
    for month in months {
        builder = builder.month(month);
    }
    if let Some(volume) = volume {
        builder = builder.volume(volume);
    }
    builder.build()
}

pub async fn run(ctx: &Context, action: RoutinesAction) -> CommandResult {
    let routines = ctx.routines();
    match action {
        RoutinesAction::List => {
            let scenes = ctx.scenes();
            let (listed, scenes) = tokio::try_join!(routines.refresh(), scenes.refresh())?;
            if listed.is_empty() {
                println!("no routines");
            }
            let now = Local::now().naive_local();
            let locale = ctx.config.display.locale;
            for routine in &listed {
                let name = scene_name(&scenes, routine.scene_id);
                let active = is_active_now(routine, now);
                println!("{}", render::routine_card(routine, name, active, locale));
            }
        }
        RoutinesAction::Add(args) => {
            let draft = build_draft(
                SceneId::new(args.scene),
                args.start,
                args.end,
                args.days,
                args.months,
                args.volume,
            )?;
            let created = routines.create(&draft).await?;
            println!("created routine #{}", created.id);
        }
        RoutinesAction::Edit(args) => {
            let id = RoutineId::new(args.id);
            let current = routines
                .refresh()
                .await?
                .into_iter()
                .find(|r| r.id == id)
                .ok_or_else(|| NotFoundError {
                    entity: "Routine",
                    id: id.to_string(),
                })
                .map_err(VibraeError::from)?;
            let base = current.to_draft();
            let days = if args.every_day {
                Vec::new()
            } else {
                args.days.unwrap_or_else(|| tokens(&base.weekdays))
            };
            let months = if args.every_month {
                Vec::new()
            } else {
                args.months.unwrap_or_else(|| tokens(&base.months))
            };
            let draft = build_draft(
                args.scene.map_or(base.scene_id, SceneId::new),
                args.start.unwrap_or(base.start_time),
                args.end.unwrap_or(base.end_time),
                days,
                months,
                Some(args.volume.unwrap_or(i64::from(base.volume))),
            )?;
            routines.update(id, &draft).await?;
            println!("updated routine #{id}");
        }
        RoutinesAction::Delete { id } => {
            routines.delete(RoutineId::new(id)).await?;
            println!("deleted routine #{id}");
        }
        RoutinesAction::Duplicate { id } => {
            routines.refresh().await?;
            let copy = routines.duplicate(RoutineId::new(id)).await?;
            println!("created routine #{} as a copy of #{id}", copy.id);
        }
        RoutinesAction::Week { month } => {
            let anchor = month.unwrap_or_else(|| Local::now().date_naive());
            let scenes = ctx.scenes();
            let (_, scenes) = tokio::try_join!(routines.refresh(), scenes.refresh())?;
            let locale = ctx.config.display.locale;
            let monday = representative_week(anchor)[0];
            println!("week of {}", monday.format("%d/%m/%Y"));
            let text = routines
                .week(anchor, &scenes, |grid| render::week(grid, locale))
                .await;
            print!("{text}");
        }
    }
    Ok(())
}
