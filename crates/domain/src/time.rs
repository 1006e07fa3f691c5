//! Time-of-day helpers: `HH:MM` strings, minute-of-day integers, and
//! overnight-aware windows.

use chrono::{NaiveTime, Timelike};

/// Minutes in a calendar day; minute-of-day values live in `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Parse an `HH:MM` (24h) string into minutes since midnight.
///
/// Accepts exactly what `^([01]?\d|2[0-3]):[0-5]\d$` accepts: a one or
/// two digit hour in `0..=23` and a two digit minute in `0..=59`.
/// Surrounding whitespace is not stripped.
#[must_use]
pub fn parse_time_to_minutes(s: &str) -> Option<u16> {
    let (hour, minute) = s.split_once(':')?;
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u16 = hour.parse().ok()?;
    let minute: u16 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Format a minute offset as zero-padded `HH:MM`, wrapping modulo one day.
///
/// Negative offsets wrap backwards, so `-30` renders as `23:30`.
#[must_use]
pub fn minutes_to_time(minutes: i32) -> String {
    let m = minutes.rem_euclid(i32::from(MINUTES_PER_DAY));
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Shift an `HH:MM` string by `delta` minutes, wrapping around midnight.
///
/// Returns the input unchanged when it does not parse.
#[must_use]
pub fn add_minutes(time: &str, delta: i32) -> String {
    match parse_time_to_minutes(time) {
        Some(m) => minutes_to_time(i32::from(m) + delta),
        None => time.to_string(),
    }
}

/// Minutes since midnight for a wall-clock time (seconds are truncated).
#[must_use]
pub fn minute_of_day(time: NaiveTime) -> u16 {
    // hour <= 23 and minute <= 59, so the value always fits.
    u16::try_from(time.hour() * 60 + time.minute()).unwrap_or(0)
}

/// A daily time window `[start, end)` in minutes since midnight.
///
/// When `end <= start` the window is *overnight*: it runs from `start`
/// to midnight and continues from midnight to `end` on the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u16,
    pub end: u16,
}

impl TimeWindow {
    /// Build a window from two `HH:MM` strings; `None` if either is malformed.
    #[must_use]
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self {
            start: parse_time_to_minutes(start)?,
            end: parse_time_to_minutes(end)?,
        })
    }

    #[must_use]
    pub fn is_overnight(self) -> bool {
        self.end <= self.start
    }

    /// Whether `minute` falls inside the window, ignoring which day it belongs to.
    #[must_use]
    pub fn contains_minute(self, minute: u16) -> bool {
        if self.is_overnight() {
            minute >= self.start || minute < self.end
        } else {
            minute >= self.start && minute < self.end
        }
    }

    /// Length in minutes, counting the part past midnight for overnight windows.
    #[must_use]
    pub fn duration_minutes(self) -> u16 {
        if self.is_overnight() {
            MINUTES_PER_DAY - self.start + self.end
        } else {
            self.end - self.start
        }
    }

    /// Split into the part on the starting day and the carry-over tail.
    ///
    /// The tail `[0, end)` exists only for overnight windows with `end > 0`.
    #[must_use]
    pub fn segments(self) -> ((u16, u16), Option<(u16, u16)>) {
        if self.is_overnight() {
            let tail = (self.end > 0).then_some((0, self.end));
            ((self.start, MINUTES_PER_DAY), tail)
        } else {
            ((self.start, self.end), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_valid_times() {
        assert_eq!(parse_time_to_minutes("00:00"), Some(0));
        assert_eq!(parse_time_to_minutes("23:59"), Some(1439));
        assert_eq!(parse_time_to_minutes("9:05"), Some(545));
        assert_eq!(parse_time_to_minutes("19:30"), Some(1170));
    }

    #[test]
    fn should_reject_malformed_times() {
        for input in [
            "", "24:00", "12:60", "1:5", "123:00", "12:000", "ab:cd", " 12:00", "12:00 ", "12-00",
            "+1:00",
        ] {
            assert_eq!(parse_time_to_minutes(input), None, "{input:?}");
        }
    }

    #[test]
    fn should_format_back_to_the_parsed_string() {
        for input in ["00:00", "07:05", "12:30", "23:59"] {
            let minutes = parse_time_to_minutes(input).unwrap();
            assert_eq!(minutes_to_time(i32::from(minutes)), input);
        }
    }

    #[test]
    fn should_wrap_out_of_range_minutes() {
        assert_eq!(minutes_to_time(1440), "00:00");
        assert_eq!(minutes_to_time(1500), "01:00");
        assert_eq!(minutes_to_time(-30), "23:30");
        assert_eq!(minutes_to_time(-1440 * 3 - 1), "23:59");
    }

    #[test]
    fn should_add_minutes_across_midnight() {
        assert_eq!(add_minutes("23:30", 45), "00:15");
        assert_eq!(add_minutes("00:10", -20), "23:50");
        assert_eq!(add_minutes("08:00", 0), "08:00");
    }

    #[test]
    fn should_return_input_unchanged_when_add_minutes_cannot_parse() {
        assert_eq!(add_minutes("noon", 30), "noon");
    }

    #[test]
    fn should_compute_minute_of_day() {
        let t = NaiveTime::from_hms_opt(13, 45, 59).unwrap();
        assert_eq!(minute_of_day(t), 825);
    }

    #[test]
    fn should_detect_overnight_windows() {
        let same_day = TimeWindow::parse("09:00", "17:00").unwrap();
        let overnight = TimeWindow::parse("22:00", "06:00").unwrap();
        assert!(!same_day.is_overnight());
        assert!(overnight.is_overnight());
        assert_eq!(same_day.duration_minutes(), 480);
        assert_eq!(overnight.duration_minutes(), 480);
    }

    #[test]
    fn should_treat_window_as_half_open() {
        let w = TimeWindow::parse("09:00", "17:00").unwrap();
        assert!(w.contains_minute(540));
        assert!(!w.contains_minute(1020));

        let night = TimeWindow::parse("22:00", "06:00").unwrap();
        assert!(night.contains_minute(1410));
        assert!(night.contains_minute(0));
        assert!(!night.contains_minute(360));
        assert!(!night.contains_minute(720));
    }

    #[test]
    fn should_split_overnight_window_into_segments() {
        let night = TimeWindow::parse("23:00", "01:00").unwrap();
        assert_eq!(night.segments(), ((1380, 1440), Some((0, 60))));

        let to_midnight = TimeWindow::parse("22:00", "00:00").unwrap();
        assert_eq!(to_midnight.segments(), ((1320, 1440), None));

        let day = TimeWindow::parse("09:00", "17:00").unwrap();
        assert_eq!(day.segments(), ((540, 1020), None));
    }

    #[test]
    fn should_not_build_window_from_bad_input() {
        assert!(TimeWindow::parse("9am", "17:00").is_none());
        assert!(TimeWindow::parse("09:00", "").is_none());
    }
}
