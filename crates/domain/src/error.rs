//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`VibraeError`]
//! at port boundaries (see `into_domain` on the adapter error enums).

/// Top-level error for every use-case and port.
#[derive(Debug, thiserror::Error)]
pub enum VibraeError {
    /// Client-side input checks failed; recover locally and let the user fix the form.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record is not in the local cache or on the backend.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Token missing or rejected. Terminal for the current screen, never retried.
    #[error("not authenticated")]
    Unauthenticated,

    /// Transport failure or non-2xx answer from the backend.
    #[error("backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a form or a value object fails its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("name must not be empty")]
    EmptyName,

    #[error("{field} `{value}` is not a valid HH:MM (24h) time")]
    InvalidTime { field: &'static str, value: String },

    #[error("end time must differ from start time")]
    ZeroLengthWindow,

    #[error("volume {0} is outside 0..=100")]
    VolumeOutOfRange(i64),

    #[error("unknown weekday `{0}`")]
    UnknownWeekday(String),

    #[error("unknown month `{0}`")]
    UnknownMonth(String),

    #[error("passwords do not match")]
    PasswordMismatch,
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_domain_error() {
        let err: VibraeError = ValidationError::ZeroLengthWindow.into();
        assert!(matches!(
            err,
            VibraeError::Validation(ValidationError::ZeroLengthWindow)
        ));
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Routine",
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Routine 42 not found");
    }

    #[test]
    fn should_display_invalid_time_with_offending_value() {
        let err = ValidationError::InvalidTime {
            field: "start_time",
            value: "25:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "start_time `25:00` is not a valid HH:MM (24h) time"
        );
    }
}
