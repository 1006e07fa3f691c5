//! Routine service: schedule CRUD with a local cache.

use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::RwLock;
use vibrae_domain::activity::active_routine;
use vibrae_domain::calendar::{GridDay, week_grid};
use vibrae_domain::error::{NotFoundError, VibraeError};
use vibrae_domain::id::RoutineId;
use vibrae_domain::routine::{Routine, RoutineDraft};
use vibrae_domain::scene::Scene;

use crate::ports::RoutineRepository;

/// Application service for routines.
///
/// The backend is authoritative; the cached list is replaced after every
/// successful mutation and on [`refresh`](Self::refresh).
pub struct RoutineService<R> {
    repo: R,
    cache: RwLock<Vec<Routine>>,
}

impl<R: RoutineRepository> RoutineService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            cache: RwLock::new(Vec::new()),
        }
    }

    /// Reload the list from the backend.
    ///
    /// # Errors
    ///
    /// Returns the repository error; the cache is left untouched.
    pub async fn refresh(&self) -> Result<Vec<Routine>, VibraeError> {
        let routines = self.repo.list().await?;
        tracing::debug!(count = routines.len(), "routines refreshed");
        *self.cache.write().await = routines.clone();
        Ok(routines)
    }

    /// Refresh after a committed write. A failed reload keeps the stale list
    /// so the write itself is never reported as failed.
    async fn resync(&self) {
        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, "could not reload routines after a change");
        }
    }

    /// The list as of the last refresh.
    pub async fn cached(&self) -> Vec<Routine> {
        self.cache.read().await.clone()
    }

    /// Create a routine after validating the draft.
    ///
    /// # Errors
    ///
    /// Returns [`VibraeError::Validation`] if the draft is invalid, or a
    /// backend error from the repository.
    #[tracing::instrument(skip(self, draft), fields(scene_id = %draft.scene_id))]
    pub async fn create(&self, draft: &RoutineDraft) -> Result<Routine, VibraeError> {
        draft.validate()?;
        let created = self.repo.create(draft).await?;
        tracing::info!(id = %created.id, "routine created");
        self.resync().await;
        Ok(created)
    }

    /// Replace an existing routine.
    ///
    /// # Errors
    ///
    /// Returns [`VibraeError::Validation`] if the draft is invalid, or a
    /// backend error from the repository.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update(&self, id: RoutineId, draft: &RoutineDraft) -> Result<Routine, VibraeError> {
        draft.validate()?;
        let updated = self.repo.update(id, draft).await?;
        tracing::info!("routine updated");
        self.resync().await;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns a backend error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: RoutineId) -> Result<(), VibraeError> {
        self.repo.delete(id).await?;
        tracing::info!("routine deleted");
        self.resync().await;
        Ok(())
    }

    /// Create a copy of a cached routine with a new id.
    ///
    /// # Errors
    ///
    /// Returns [`VibraeError::NotFound`] when `id` is not in the cache, or a
    /// backend error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn duplicate(&self, id: RoutineId) -> Result<Routine, VibraeError> {
        let draft = self
            .cache
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .map(Routine::to_draft)
            .ok_or_else(|| NotFoundError {
                entity: "Routine",
                id: id.to_string(),
            })?;
        self.create(&draft).await
    }

    /// The cached routine that should be playing at `now`, if any.
    pub async fn active_now(&self, now: NaiveDateTime) -> Option<Routine> {
        active_routine(&self.cache.read().await, now).cloned()
    }

    /// Lay the cached routines out on the representative week of `anchor`'s
    /// month and hand the grid to `render`.
    pub async fn week<T>(
        &self,
        anchor: NaiveDate,
        scenes: &[Scene],
        render: impl FnOnce(&[GridDay<'_>]) -> T,
    ) -> T {
        let routines = self.cache.read().await;
        let grid = week_grid(anchor, &routines, scenes);
        render(&grid)
    }
}
