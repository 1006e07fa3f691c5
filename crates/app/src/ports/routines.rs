//! Routine port: the backend's `/schedule/` collection.

use std::future::Future;

use vibrae_domain::error::VibraeError;
use vibrae_domain::id::RoutineId;
use vibrae_domain::routine::{Routine, RoutineDraft};

/// Remote store of [`Routine`]s. The backend assigns ids.
pub trait RoutineRepository {
    /// Fetch every routine.
    fn list(&self) -> impl Future<Output = Result<Vec<Routine>, VibraeError>> + Send;

    /// Create a routine and return the stored record.
    fn create(
        &self,
        draft: &RoutineDraft,
    ) -> impl Future<Output = Result<Routine, VibraeError>> + Send;

    /// Replace the fields of an existing routine.
    fn update(
        &self,
        id: RoutineId,
        draft: &RoutineDraft,
    ) -> impl Future<Output = Result<Routine, VibraeError>> + Send;

    fn delete(&self, id: RoutineId) -> impl Future<Output = Result<(), VibraeError>> + Send;
}
