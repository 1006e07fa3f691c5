//! Plain-text rendering of the client views.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, Local};
use vibrae_domain::calendar::GridDay;
use vibrae_domain::logs::{LineKind, LogFile, classify_lines};
use vibrae_domain::player::PlayerStatus;
use vibrae_domain::recurrence::{Locale, split_summary};
use vibrae_domain::routine::Routine;
use vibrae_domain::scene::Scene;
use vibrae_domain::time::{MINUTES_PER_DAY, minutes_to_time};

const NO_SCENE: &str = "(no scene!)";

/// Grid offsets run up to the end of the day, which prints as `24:00`.
pub fn grid_time(minute: u16) -> String {
    if minute >= MINUTES_PER_DAY {
        "24:00".to_string()
    } else {
        minutes_to_time(i32::from(minute))
    }
}

fn tags(summary: &str) -> String {
    split_summary(summary)
        .into_iter()
        .map(|segment| format!("[{segment}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One routine as a small card: scene and window, day and month tags, volume.
pub fn routine_card(routine: &Routine, scene: &str, active: bool, locale: Locale) -> String {
    let scene = if scene.is_empty() { NO_SCENE } else { scene };
    let mut out = format!(
        "#{:<4} {scene}  {}-{}",
        routine.id, routine.start_time, routine.end_time
    );
    if active {
        out.push_str("  (active now)");
    }
    let _ = write!(
        out,
        "\n      {}\n      {}\n      volume {}%",
        tags(&routine.weekday_set().summarize(locale)),
        tags(&routine.month_set().summarize(locale)),
        routine.volume,
    );
    out
}

pub fn scene_row(scene: &Scene) -> String {
    format!("#{:<4} {}  ({})", scene.id, scene.name, scene.path)
}

/// The representative week, one block per day.
pub fn week(grid: &[GridDay<'_>], locale: Locale) -> String {
    let labels = locale.weekday_labels();
    let mut out = String::new();
    for day in grid {
        let label = labels[day.date.weekday().num_days_from_monday() as usize];
        let _ = writeln!(out, "{label} {}", day.date.format("%d/%m"));
        if day.events.is_empty() {
            out.push_str("  -\n");
        }
        for event in &day.events {
            let scene = if event.scene_name.is_empty() {
                NO_SCENE
            } else {
                event.scene_name
            };
            let _ = writeln!(
                out,
                "  {}-{}  {scene} (#{})",
                grid_time(event.start),
                grid_time(event.end),
                event.routine.id
            );
        }
    }
    out
}

pub fn log_file(file: &LogFile) -> String {
    let modified = DateTime::from_timestamp(file.mtime, 0).map_or_else(
        || file.mtime.to_string(),
        |at| {
            at.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    );
    #[allow(clippy::cast_precision_loss)]
    let kib = file.size as f64 / 1024.0;
    format!("{:<40} {kib:>9.1} KB  {modified}", file.name)
}

/// Log content, optionally reduced to failing entries and their stack lines.
pub fn log_text(text: &str, failures_only: bool) -> String {
    if !failures_only {
        return text.to_string();
    }
    classify_lines(text)
        .into_iter()
        .filter(|(kind, _)| match kind {
            LineKind::Entry(level) => level.is_failure(),
            LineKind::Stack => true,
            LineKind::Blank | LineKind::Banner | LineKind::Plain => false,
        })
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn player(status: &PlayerStatus) -> String {
    let track = status.track_name().unwrap_or("nothing");
    match status.volume {
        Some(volume) => format!("playing: {track}  volume: {volume}%"),
        None => format!("playing: {track}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use vibrae_domain::calendar::week_grid;
    use vibrae_domain::id::{RoutineId, SceneId};

    use super::*;

    fn routine(id: i64, start: &str, end: &str, weekdays: &str) -> Routine {
        Routine {
            id: RoutineId::new(id),
            scene_id: SceneId::new(1),
            start_time: start.to_string(),
            end_time: end.to_string(),
            volume: 40,
            weekdays: Some(weekdays.to_string()),
            months: None,
        }
    }

    #[test]
    fn should_print_end_of_day_as_24() {
        assert_eq!(grid_time(0), "00:00");
        assert_eq!(grid_time(615), "10:15");
        assert_eq!(grid_time(1440), "24:00");
    }

    #[test]
    fn should_render_routine_card_with_tags() {
        let card = routine_card(&routine(3, "22:00", "06:00", "sat,sun,mon"), "Rain", true, Locale::English);
        assert!(card.starts_with("#3    Rain  22:00-06:00  (active now)"));
        assert!(card.contains("[Sat–Mon]"));
        assert!(card.contains("[every month]"));
        assert!(card.contains("volume 40%"));
    }

    #[test]
    fn should_flag_missing_scene() {
        let card = routine_card(&routine(1, "08:00", "09:00", ""), "", false, Locale::English);
        assert!(card.contains(NO_SCENE));
        assert!(!card.contains("active now"));
    }

    #[test]
    fn should_render_week_with_split_overnight_event() {
        let routines = vec![routine(7, "22:00", "02:00", "fri")];
        let scenes = vec![Scene {
            id: SceneId::new(1),
            name: "Owls".to_string(),
            path: "owls".to_string(),
        }];
        let grid = week_grid(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), &routines, &scenes);
        let text = week(&grid, Locale::English);
        assert!(text.contains("22:00-24:00  Owls (#7)"));
        assert!(text.contains("00:00-02:00  Owls (#7)"));
        assert!(text.contains("  -\n"));
    }

    #[test]
    fn should_keep_only_failures_and_their_stack() {
        let text = "2024-01-01 10:00:00 INFO boot\n\
                    2024-01-01 10:00:01 ERROR boom\n\
                    Traceback (most recent call last):\n\
                    \n\
                    2024-01-01 10:00:02 INFO recovered";
        let filtered = log_text(text, true);
        assert!(filtered.contains("ERROR boom"));
        assert!(filtered.contains("Traceback"));
        assert!(!filtered.contains("boot"));
        assert!(!filtered.contains("recovered"));
        assert_eq!(log_text(text, false), text);
    }

    #[test]
    fn should_render_log_file_size_in_kib() {
        let file = LogFile {
            name: "backend.log".to_string(),
            size: 2048,
            mtime: 0,
        };
        assert!(log_file(&file).contains("2.0 KB"));
    }

    #[test]
    fn should_render_player_state() {
        let status = PlayerStatus {
            now_playing: Some("/music/rain/drops.mp3".to_string()),
            volume: Some(35),
            loaded: true,
        };
        assert_eq!(player(&status), "playing: drops.mp3  volume: 35%");
        assert_eq!(player(&PlayerStatus::default()), "playing: nothing");
    }
}
