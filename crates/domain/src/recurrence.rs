//! Weekday and month recurrence sets, and their human-readable summaries.
//!
//! Routines carry their filters as comma-separated lowercase tokens
//! (`"mon,tue"`, `"dec,jan"`); an empty filter means "every day" / "every
//! month". The sets here are small bitsets indexed in calendar order
//! (`mon = 0 .. sun = 6`, `jan = 0 .. dec = 11`).

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::ValidationError;

/// Canonical weekday tokens in week order (Monday first).
pub const WEEKDAY_TOKENS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Canonical month tokens in calendar order.
pub const MONTH_TOKENS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Separator placed between ranges in a summary.
pub const SUMMARY_SEPARATOR: &str = " · ";

fn token_index(table: &[&str], token: &str) -> Option<usize> {
    let token = token.trim();
    table.iter().position(|t| t.eq_ignore_ascii_case(token))
}

/// Lenient lookup on the first three letters, so `"Monday"` finds `mon`.
fn prefix_index(table: &[&str], token: &str) -> Option<usize> {
    let prefix = token.trim().chars().take(3).collect::<String>().to_lowercase();
    table.iter().position(|t| *t == prefix)
}

fn split_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty())
}

fn join_tokens(table: &[&str], bits: u16) -> String {
    table
        .iter()
        .enumerate()
        .filter(|(i, _)| bits & (1 << i) != 0)
        .map(|(_, t)| *t)
        .collect::<Vec<_>>()
        .join(",")
}

/// Token for a weekday (`Weekday::Mon` → `"mon"`).
#[must_use]
pub fn weekday_token(day: Weekday) -> &'static str {
    WEEKDAY_TOKENS[day.num_days_from_monday() as usize]
}

/// Token for the month a date falls in (`2024-12-05` → `"dec"`).
#[must_use]
pub fn month_token(date: NaiveDate) -> &'static str {
    MONTH_TOKENS[date.month0() as usize]
}

/// Set of weekdays a routine is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const ALL: Self = Self(0b111_1111);
    pub const WORKWEEK: Self = Self(0b001_1111);
    pub const WEEKEND: Self = Self(0b110_0000);

    /// Marks a filter that was given but named no known day; matches nothing.
    const UNMATCHED: u8 = 1 << 7;

    /// Parse leniently: tokens are trimmed, case-insensitive and matched on
    /// their first three letters; unknown tokens and duplicates are ignored.
    /// A non-blank filter with no known token matches no day at all.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::from_tokens(split_tokens(raw))
    }

    /// Parse strictly, rejecting unknown tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownWeekday`] for the first unknown token.
    pub fn try_parse(raw: &str) -> Result<Self, ValidationError> {
        let mut set = Self::default();
        for token in split_tokens(raw) {
            let idx = token_index(&WEEKDAY_TOKENS, token)
                .ok_or_else(|| ValidationError::UnknownWeekday(token.to_string()))?;
            set.0 |= 1 << idx;
        }
        Ok(set)
    }

    /// Build from individual tokens (lenient, like [`parse`](Self::parse)).
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        let mut given = false;
        for token in tokens {
            let token = token.as_ref();
            given |= !token.trim().is_empty();
            if let Some(idx) = prefix_index(&WEEKDAY_TOKENS, token) {
                set.0 |= 1 << idx;
            }
        }
        if given && set.is_empty() {
            set.0 = Self::UNMATCHED;
        }
        set
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 &= !Self::UNMATCHED;
        self.0 |= 1 << day.num_days_from_monday();
    }

    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        (self.0 & Self::ALL.0).count_ones() as usize
    }

    /// Filter check: an empty set admits every day.
    #[must_use]
    pub fn matches(self, day: Weekday) -> bool {
        self.is_empty() || self.contains(day)
    }

    /// Canonical comma-separated tokens in week order.
    #[must_use]
    pub fn to_tokens(self) -> String {
        join_tokens(&WEEKDAY_TOKENS, u16::from(self.0))
    }

    /// Human-readable summary such as `"weekdays"` or `"Sat–Mon · Wed"`.
    #[must_use]
    pub fn summarize(self, locale: Locale) -> String {
        if self.is_empty() || self == Self::ALL {
            return locale.every_day().to_string();
        }
        if self == Self::WORKWEEK {
            return locale.workweek().to_string();
        }
        if self == Self::WEEKEND {
            return locale.weekend().to_string();
        }
        if self.0 == Self::UNMATCHED {
            return locale.never().to_string();
        }
        let indices = (0..7).filter(|i| self.0 & (1 << i) != 0);
        render_ranges(&coalesce(indices, 6), locale.weekday_labels(), locale)
    }
}

/// Set of months a routine is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthSet(u16);

impl MonthSet {
    pub const ALL: Self = Self(0b1111_1111_1111);

    /// Marks a filter that was given but named no known month; matches nothing.
    const UNMATCHED: u16 = 1 << 15;

    /// Parse leniently, like [`WeekdaySet::parse`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::from_tokens(split_tokens(raw))
    }

    /// Parse strictly, rejecting unknown tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownMonth`] for the first unknown token.
    pub fn try_parse(raw: &str) -> Result<Self, ValidationError> {
        let mut set = Self::default();
        for token in split_tokens(raw) {
            let idx = token_index(&MONTH_TOKENS, token)
                .ok_or_else(|| ValidationError::UnknownMonth(token.to_string()))?;
            set.0 |= 1 << idx;
        }
        Ok(set)
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        let mut given = false;
        for token in tokens {
            let token = token.as_ref();
            given |= !token.trim().is_empty();
            if let Some(idx) = prefix_index(&MONTH_TOKENS, token) {
                set.0 |= 1 << idx;
            }
        }
        if given && set.is_empty() {
            set.0 = Self::UNMATCHED;
        }
        set
    }

    /// Whether the month of `date` is in the set.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.0 & (1 << date.month0()) != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        (self.0 & Self::ALL.0).count_ones() as usize
    }

    /// Filter check: an empty set admits every month.
    #[must_use]
    pub fn matches(self, date: NaiveDate) -> bool {
        self.is_empty() || self.contains(date)
    }

    #[must_use]
    pub fn to_tokens(self) -> String {
        join_tokens(&MONTH_TOKENS, self.0)
    }

    /// Human-readable summary such as `"whole year"` or `"Dec–Feb"`.
    #[must_use]
    pub fn summarize(self, locale: Locale) -> String {
        if self.is_empty() {
            return locale.every_month().to_string();
        }
        if self == Self::ALL {
            return locale.whole_year().to_string();
        }
        if self.0 == Self::UNMATCHED {
            return locale.never().to_string();
        }
        let indices = (0..12).filter(|i| self.0 & (1 << i) != 0);
        render_ranges(&coalesce(indices, 11), locale.month_labels(), locale)
    }
}

/// Summarize weekday tokens in English.
#[must_use]
pub fn summarize_days<S: AsRef<str>>(tokens: &[S]) -> String {
    WeekdaySet::from_tokens(tokens).summarize(Locale::English)
}

/// Summarize month tokens in English.
#[must_use]
pub fn summarize_months<S: AsRef<str>>(tokens: &[S]) -> String {
    MonthSet::from_tokens(tokens).summarize(Locale::English)
}

/// Split a summary back into its range segments (one tag per segment).
#[must_use]
pub fn split_summary(summary: &str) -> Vec<&str> {
    summary
        .split(SUMMARY_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Group ascending indices into closed runs, then fold a run touching the
/// last index into a run starting at zero (`sat,sun,mon` → one range).
fn coalesce(indices: impl Iterator<Item = usize>, last: usize) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end + 1 == idx => *end = idx,
            _ => ranges.push((idx, idx)),
        }
    }
    if ranges.len() > 1 {
        if let (Some(&(first_start, first_end)), Some(&(tail_start, tail_end))) =
            (ranges.first(), ranges.last())
        {
            if first_start == 0 && tail_end == last {
                ranges.pop();
                ranges[0] = (tail_start, first_end);
            }
        }
    }
    ranges
}

fn render_ranges(ranges: &[(usize, usize)], labels: &[&str], locale: Locale) -> String {
    ranges
        .iter()
        .map(|&(a, b)| {
            if a == b {
                labels[a].to_string()
            } else {
                locale.range(labels[a], labels[b])
            }
        })
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

/// Language used for summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Spanish,
}

impl Locale {
    fn every_day(self) -> &'static str {
        match self {
            Self::English => "every day",
            Self::Spanish => "Todos los días",
        }
    }

    fn workweek(self) -> &'static str {
        match self {
            Self::English => "weekdays",
            Self::Spanish => "Laborables",
        }
    }

    fn weekend(self) -> &'static str {
        match self {
            Self::English => "weekend",
            Self::Spanish => "Fin de semana",
        }
    }

    fn every_month(self) -> &'static str {
        match self {
            Self::English => "every month",
            Self::Spanish => "Todos los meses",
        }
    }

    fn whole_year(self) -> &'static str {
        match self {
            Self::English => "whole year",
            Self::Spanish => "Todo el año",
        }
    }

    fn never(self) -> &'static str {
        match self {
            Self::English => "never",
            Self::Spanish => "Nunca",
        }
    }

    fn range(self, from: &str, to: &str) -> String {
        match self {
            Self::English => format!("{from}–{to}"),
            Self::Spanish => format!("de {from} a {to}"),
        }
    }

    /// Short weekday labels, Monday first.
    #[must_use]
    pub fn weekday_labels(self) -> &'static [&'static str; 7] {
        match self {
            Self::English => &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            Self::Spanish => &["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"],
        }
    }

    /// Short month labels, January first.
    #[must_use]
    pub fn month_labels(self) -> &'static [&'static str; 12] {
        match self {
            Self::English => &[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
            Self::Spanish => &[
                "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
            ],
        }
    }
}
