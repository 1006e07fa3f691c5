//! HTTP implementation of [`RoutineRepository`] over `/schedule/`.

use std::future::Future;

use reqwest::Method;
use vibrae_app::ports::RoutineRepository;
use vibrae_domain::error::VibraeError;
use vibrae_domain::id::RoutineId;
use vibrae_domain::routine::{Routine, RoutineDraft};

use crate::client::ApiClient;

const COLLECTION: &str = "schedule/";

/// Routines stored on the backend.
#[derive(Debug, Clone)]
pub struct HttpRoutineRepository {
    client: ApiClient,
}

impl HttpRoutineRepository {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl RoutineRepository for HttpRoutineRepository {
    fn list(&self) -> impl Future<Output = Result<Vec<Routine>, VibraeError>> + Send {
        let client = self.client.clone();
        async move { Ok(client.get_json(COLLECTION).await?) }
    }

    fn create(
        &self,
        draft: &RoutineDraft,
    ) -> impl Future<Output = Result<Routine, VibraeError>> + Send {
        let client = self.client.clone();
        let body = draft.clone();
        async move { Ok(client.send_json(Method::POST, COLLECTION, &body).await?) }
    }

    fn update(
        &self,
        id: RoutineId,
        draft: &RoutineDraft,
    ) -> impl Future<Output = Result<Routine, VibraeError>> + Send {
        let client = self.client.clone();
        let body = draft.clone();
        // The backend registers updates without a trailing slash.
        let path = format!("schedule/{id}");
        async move { Ok(client.send_json(Method::PUT, &path, &body).await?) }
    }

    fn delete(&self, id: RoutineId) -> impl Future<Output = Result<(), VibraeError>> + Send {
        let client = self.client.clone();
        let path = format!("schedule/{id}/");
        async move { Ok(client.send_empty(Method::DELETE, &path, &[]).await?) }
    }
}
