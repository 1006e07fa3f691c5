//! Which routine should be playing right now.
//!
//! [`is_active_now`] consults the weekday filter only, while
//! [`in_effect_on`] (used by the calendar grid) consults weekday and month.
//! Both behaviours are kept distinct.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::routine::Routine;
use crate::time::minute_of_day;

/// Whether `routine` covers the wall-clock instant `now`.
///
/// A same-day window is active when today passes the weekday filter and
/// `now` is in `[start, end)`. An overnight window is active when today
/// passes and `now >= start`, or yesterday passes and `now < end`. An empty
/// weekday filter means every day. Malformed times are never active.
#[must_use]
pub fn is_active_now(routine: &Routine, now: NaiveDateTime) -> bool {
    let Some(window) = routine.window() else {
        return false;
    };
    let minute = minute_of_day(now.time());
    let days = routine.weekday_set();
    let today = now.weekday();

    if window.is_overnight() {
        (days.matches(today) && minute >= window.start)
            || (days.matches(today.pred()) && minute < window.end)
    } else {
        days.matches(today) && minute >= window.start && minute < window.end
    }
}

/// The first routine, in list order, that [`is_active_now`] accepts.
#[must_use]
pub fn active_routine(routines: &[Routine], now: NaiveDateTime) -> Option<&Routine> {
    routines.iter().find(|r| is_active_now(r, now))
}

/// Whether `date` passes both the weekday and month filters of `routine`.
#[must_use]
pub fn in_effect_on(routine: &Routine, date: NaiveDate) -> bool {
    routine.weekday_set().matches(date.weekday()) && routine.month_set().matches(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{RoutineId, SceneId};

    fn routine(start: &str, end: &str, weekdays: &str, months: &str) -> Routine {
        Routine {
            id: RoutineId::new(1),
            scene_id: SceneId::new(1),
            start_time: start.to_string(),
            end_time: end.to_string(),
            volume: 50,
            weekdays: Some(weekdays.to_string()),
            months: Some(months.to_string()),
        }
    }

    // 2024-06-07 is a Friday.
    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn should_cover_both_sides_of_midnight_for_overnight_window() {
        let r = routine("22:00", "06:00", "", "");
        assert!(is_active_now(&r, at(7, 23, 30)));
        assert!(is_active_now(&r, at(7, 5, 0)));
        assert!(!is_active_now(&r, at(7, 12, 0)));
    }

    #[test]
    fn should_respect_weekday_filter_on_same_day_window() {
        let r = routine("09:00", "17:00", "mon,tue,wed,thu,fri", "");
        assert!(is_active_now(&r, at(7, 12, 0)));
        assert!(!is_active_now(&r, at(8, 12, 0)));
    }

    #[test]
    fn should_use_yesterday_filter_for_overnight_tail() {
        let r = routine("23:00", "01:00", "fri", "");
        // Saturday 00:30 is the tail of Friday's window.
        assert!(is_active_now(&r, at(8, 0, 30)));
        // Friday 00:30 would be Thursday's tail.
        assert!(!is_active_now(&r, at(7, 0, 30)));
        assert!(is_active_now(&r, at(7, 23, 15)));
        assert!(!is_active_now(&r, at(8, 23, 15)));
    }

    #[test]
    fn should_treat_end_as_exclusive() {
        let r = routine("09:00", "17:00", "", "");
        assert!(is_active_now(&r, at(7, 9, 0)));
        assert!(!is_active_now(&r, at(7, 17, 0)));
    }

    #[test]
    fn should_never_activate_malformed_routine() {
        let r = routine("9am", "17:00", "", "");
        assert!(!is_active_now(&r, at(7, 12, 0)));
    }

    #[test]
    fn should_ignore_months_when_checking_now() {
        let r = routine("09:00", "17:00", "", "jan");
        assert!(is_active_now(&r, at(7, 12, 0)));
        assert!(!in_effect_on(&r, at(7, 12, 0).date()));
    }

    #[test]
    fn should_not_widen_unrecognised_filter() {
        let r = routine("09:00", "17:00", "someday", "smarch");
        // Saturday 2024-06-08 at noon.
        assert!(!is_active_now(&r, at(8, 12, 0)));
        assert!(!in_effect_on(&r, at(8, 12, 0).date()));
    }

    #[test]
    fn should_read_stored_full_day_names_by_prefix() {
        let r = routine("09:00", "17:00", "friday", "june");
        assert!(is_active_now(&r, at(7, 12, 0)));
        assert!(!is_active_now(&r, at(8, 12, 0)));
        assert!(in_effect_on(&r, at(7, 12, 0).date()));
    }

    #[test]
    fn should_pick_first_active_routine() {
        let mut first = routine("08:00", "10:00", "", "");
        first.id = RoutineId::new(1);
        let mut second = routine("09:00", "11:00", "", "");
        second.id = RoutineId::new(2);
        let routines = vec![first, second];

        assert_eq!(
            active_routine(&routines, at(7, 9, 30)).map(|r| r.id),
            Some(RoutineId::new(1))
        );
        assert_eq!(
            active_routine(&routines, at(7, 10, 30)).map(|r| r.id),
            Some(RoutineId::new(2))
        );
        assert!(active_routine(&routines, at(7, 12, 0)).is_none());
    }

    #[test]
    fn should_apply_month_and_weekday_filters_for_date() {
        let r = routine("09:00", "10:00", "sat,sun", "jun,jul");
        let saturday = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        let friday = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        let august_saturday = NaiveDate::from_ymd_opt(2024, 8, 3).unwrap();
        assert!(in_effect_on(&r, saturday));
        assert!(!in_effect_on(&r, friday));
        assert!(!in_effect_on(&r, august_saturday));
    }
}
