//! Week view: projects routines onto one representative week per month.

use chrono::{Datelike, Days, NaiveDate};

use crate::activity::in_effect_on;
use crate::routine::Routine;
use crate::scene::{Scene, scene_name};

/// A routine's span on one day, in minutes since midnight (`[start, end)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEvent<'a> {
    pub start: u16,
    pub end: u16,
    pub routine: &'a Routine,
    pub scene_name: &'a str,
}

/// One column of the week view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDay<'a> {
    pub date: NaiveDate,
    pub events: Vec<DayEvent<'a>>,
}

/// The Monday-to-Sunday week containing the 15th of `anchor`'s month.
#[must_use]
pub fn representative_week(anchor: NaiveDate) -> [NaiveDate; 7] {
    let middle = anchor.with_day(15).unwrap_or(anchor);
    let monday = middle
        .checked_sub_days(Days::new(u64::from(middle.weekday().num_days_from_monday())))
        .unwrap_or(middle);
    std::array::from_fn(|i| {
        monday
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(monday)
    })
}

/// Events drawn on `day`, sorted by start minute.
///
/// Overnight routines contribute `[start, 1440)` when `day` is in effect and
/// a `[0, end)` tail when the previous day is, even if `day` itself is not.
#[must_use]
pub fn day_events<'a>(
    day: NaiveDate,
    routines: &'a [Routine],
    scenes: &'a [Scene],
) -> Vec<DayEvent<'a>> {
    let previous = day.pred_opt();
    let mut events = Vec::new();

    for routine in routines {
        let Some(window) = routine.window() else {
            continue;
        };
        let name = scene_name(scenes, routine.scene_id);
        let (head, tail) = window.segments();

        if in_effect_on(routine, day) {
            events.push(DayEvent {
                start: head.0,
                end: head.1,
                routine,
                scene_name: name,
            });
        }
        let carried = previous.is_some_and(|prev| in_effect_on(routine, prev));
        if let Some((start, end)) = tail.filter(|_| carried) {
            events.push(DayEvent {
                start,
                end,
                routine,
                scene_name: name,
            });
        }
    }

    events.sort_by_key(|e| e.start);
    events
}

/// The representative week for `anchor` with each day's events.
#[must_use]
pub fn week_grid<'a>(
    anchor: NaiveDate,
    routines: &'a [Routine],
    scenes: &'a [Scene],
) -> Vec<GridDay<'a>> {
    representative_week(anchor)
        .into_iter()
        .map(|date| GridDay {
            date,
            events: day_events(date, routines, scenes),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::id::{RoutineId, SceneId};

    fn routine(id: i64, start: &str, end: &str, weekdays: &str, months: &str) -> Routine {
        Routine {
            id: RoutineId::new(id),
            scene_id: SceneId::new(1),
            start_time: start.to_string(),
            end_time: end.to_string(),
            volume: 40,
            weekdays: Some(weekdays.to_string()),
            months: Some(months.to_string()),
        }
    }

    fn scenes() -> Vec<Scene> {
        vec![Scene {
            id: SceneId::new(1),
            name: "Birds".to_string(),
            path: "/music/birds".to_string(),
        }]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_pick_week_containing_the_fifteenth() {
        // 2024-06-15 is a Saturday.
        let week = representative_week(date(2024, 6, 2));
        assert_eq!(week[0], date(2024, 6, 10));
        assert_eq!(week[6], date(2024, 6, 16));
        assert_eq!(week[0].weekday(), Weekday::Mon);
    }

    #[test]
    fn should_start_on_the_fifteenth_when_it_is_monday() {
        // 2024-01-15 is a Monday.
        let week = representative_week(date(2024, 1, 31));
        assert_eq!(week[0], date(2024, 1, 15));
    }

    #[test]
    fn should_split_overnight_routine_across_days() {
        let routines = vec![routine(1, "23:00", "01:00", "fri", "")];
        let scenes = scenes();

        let friday = day_events(date(2024, 6, 14), &routines, &scenes);
        assert_eq!(friday.len(), 1);
        assert_eq!((friday[0].start, friday[0].end), (1380, 1440));
        assert_eq!(friday[0].scene_name, "Birds");

        let saturday = day_events(date(2024, 6, 15), &routines, &scenes);
        assert_eq!(saturday.len(), 1);
        assert_eq!((saturday[0].start, saturday[0].end), (0, 60));
    }

    #[test]
    fn should_omit_tail_for_window_ending_at_midnight() {
        let routines = vec![routine(1, "22:00", "00:00", "", "")];
        let events = day_events(date(2024, 6, 14), &routines, &[]);
        assert_eq!(events.len(), 1);
        assert_eq!((events[0].start, events[0].end), (1320, 1440));
        assert_eq!(events[0].scene_name, "");
    }

    #[test]
    fn should_sort_events_by_start() {
        let routines = vec![
            routine(1, "18:00", "19:00", "", ""),
            routine(2, "07:00", "08:00", "", ""),
            routine(3, "22:00", "02:00", "", ""),
        ];
        let events = day_events(date(2024, 6, 14), &routines, &[]);
        let starts: Vec<u16> = events.iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![0, 420, 1080, 1320]);
    }

    #[test]
    fn should_filter_by_month() {
        let routines = vec![routine(1, "09:00", "10:00", "", "dec")];
        assert!(day_events(date(2024, 6, 14), &routines, &[]).is_empty());
        assert_eq!(day_events(date(2024, 12, 14), &routines, &[]).len(), 1);
    }

    #[test]
    fn should_carry_tail_across_month_boundary_using_previous_month() {
        // 2024-07-01 follows June 30; the routine only runs in June.
        let routines = vec![routine(1, "23:00", "01:00", "", "jun")];
        let events = day_events(date(2024, 7, 1), &routines, &[]);
        assert_eq!(events.len(), 1);
        assert_eq!((events[0].start, events[0].end), (0, 60));
    }

    #[test]
    fn should_skip_malformed_routines() {
        let routines = vec![routine(1, "nope", "10:00", "", "")];
        assert!(day_events(date(2024, 6, 14), &routines, &[]).is_empty());
    }

    #[test]
    fn should_build_seven_day_grid() {
        let routines = vec![routine(1, "09:00", "10:00", "sat,sun", "")];
        let scenes = scenes();
        let grid = week_grid(date(2024, 6, 1), &routines, &scenes);
        assert_eq!(grid.len(), 7);
        let busy: Vec<NaiveDate> = grid
            .iter()
            .filter(|d| !d.events.is_empty())
            .map(|d| d.date)
            .collect();
        assert_eq!(busy, vec![date(2024, 6, 15), date(2024, 6, 16)]);
    }
}
