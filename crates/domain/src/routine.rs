//! Routine: a recurring time window during which a scene plays at a volume.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VibraeError};
use crate::id::{RoutineId, SceneId};
use crate::recurrence::{MonthSet, WeekdaySet};
use crate::time::{TimeWindow, parse_time_to_minutes};

/// A schedule entry as stored by the backend.
///
/// `start_time`/`end_time` are kept verbatim (`HH:MM`); an entry whose times
/// do not parse is never active and never drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub id: RoutineId,
    pub scene_id: SceneId,
    pub start_time: String,
    pub end_time: String,
    pub volume: u8,
    #[serde(default)]
    pub weekdays: Option<String>,
    #[serde(default)]
    pub months: Option<String>,
}

impl Routine {
    /// The parsed daily window, if both times are well-formed.
    #[must_use]
    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::parse(&self.start_time, &self.end_time)
    }

    #[must_use]
    pub fn weekday_set(&self) -> WeekdaySet {
        self.weekdays.as_deref().map(WeekdaySet::parse).unwrap_or_default()
    }

    #[must_use]
    pub fn month_set(&self) -> MonthSet {
        self.months.as_deref().map(MonthSet::parse).unwrap_or_default()
    }

    /// Request body that recreates this routine (used to duplicate it).
    #[must_use]
    pub fn to_draft(&self) -> RoutineDraft {
        RoutineDraft {
            scene_id: self.scene_id,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            weekdays: self.weekdays.clone().unwrap_or_default(),
            months: self.months.clone().unwrap_or_default(),
            volume: self.volume,
        }
    }
}

/// Create/update body for `POST /schedule/` and `PUT /schedule/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineDraft {
    pub scene_id: SceneId,
    pub start_time: String,
    pub end_time: String,
    pub weekdays: String,
    pub months: String,
    pub volume: u8,
}

impl RoutineDraft {
    /// Create a builder for constructing a [`RoutineDraft`].
    #[must_use]
    pub fn builder() -> RoutineDraftBuilder {
        RoutineDraftBuilder::default()
    }

    /// Check the invariants the routine form enforces before submitting.
    ///
    /// # Errors
    ///
    /// Returns [`VibraeError::Validation`] when:
    /// - a time is not `HH:MM` ([`ValidationError::InvalidTime`])
    /// - start equals end ([`ValidationError::ZeroLengthWindow`])
    /// - volume exceeds 100 ([`ValidationError::VolumeOutOfRange`])
    /// - a weekday or month token is unknown
    pub fn validate(&self) -> Result<(), VibraeError> {
        let start = parse_time_to_minutes(&self.start_time).ok_or_else(|| {
            ValidationError::InvalidTime {
                field: "start_time",
                value: self.start_time.clone(),
            }
        })?;
        let end =
            parse_time_to_minutes(&self.end_time).ok_or_else(|| ValidationError::InvalidTime {
                field: "end_time",
                value: self.end_time.clone(),
            })?;
        if start == end {
            return Err(ValidationError::ZeroLengthWindow.into());
        }
        if self.volume > 100 {
            return Err(ValidationError::VolumeOutOfRange(i64::from(self.volume)).into());
        }
        WeekdaySet::try_parse(&self.weekdays)?;
        MonthSet::try_parse(&self.months)?;
        Ok(())
    }
}

/// Step-by-step builder for [`RoutineDraft`].
#[derive(Debug, Default)]
pub struct RoutineDraftBuilder {
    scene_id: Option<SceneId>,
    start_time: Option<String>,
    end_time: Option<String>,
    weekdays: Vec<String>,
    months: Vec<String>,
    volume: Option<i64>,
}

impl RoutineDraftBuilder {
    #[must_use]
    pub fn scene_id(mut self, scene_id: SceneId) -> Self {
        self.scene_id = Some(scene_id);
        self
    }

    #[must_use]
    pub fn start_time(mut self, time: impl Into<String>) -> Self {
        self.start_time = Some(time.into());
        self
    }

    #[must_use]
    pub fn end_time(mut self, time: impl Into<String>) -> Self {
        self.end_time = Some(time.into());
        self
    }

    #[must_use]
    pub fn weekday(mut self, token: impl Into<String>) -> Self {
        self.weekdays.push(token.into());
        self
    }

    #[must_use]
    pub fn month(mut self, token: impl Into<String>) -> Self {
        self.months.push(token.into());
        self
    }

    /// Accepts any integer so out-of-range input surfaces as a validation error.
    #[must_use]
    pub fn volume(mut self, volume: i64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Consume the builder, validate, and return a [`RoutineDraft`].
    ///
    /// Times are trimmed and filter tokens are rendered in canonical order.
    /// Volume defaults to 50.
    ///
    /// # Errors
    ///
    /// Returns [`VibraeError::Validation`] if a required field is missing or
    /// any invariant of [`RoutineDraft::validate`] fails.
    pub fn build(self) -> Result<RoutineDraft, VibraeError> {
        let scene_id = self
            .scene_id
            .ok_or(ValidationError::EmptyField("scene_id"))?;
        let start_time = required_trimmed(self.start_time, "start_time")?;
        let end_time = required_trimmed(self.end_time, "end_time")?;
        let raw_volume = self.volume.unwrap_or(50);
        let volume = u8::try_from(raw_volume)
            .ok()
            .filter(|v| *v <= 100)
            .ok_or(ValidationError::VolumeOutOfRange(raw_volume))?;
        let weekdays = WeekdaySet::try_parse(&self.weekdays.join(","))?.to_tokens();
        let months = MonthSet::try_parse(&self.months.join(","))?.to_tokens();

        let draft = RoutineDraft {
            scene_id,
            start_time,
            end_time,
            weekdays,
            months,
            volume,
        };
        draft.validate()?;
        Ok(draft)
    }
}

fn required_trimmed(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    let value = value.unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}
