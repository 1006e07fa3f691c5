//! HTTP implementation of [`SceneRepository`] over `/scenes/`.

use std::future::Future;

use reqwest::Method;
use vibrae_app::ports::SceneRepository;
use vibrae_domain::error::VibraeError;
use vibrae_domain::id::SceneId;
use vibrae_domain::scene::{NewScene, Scene, SceneFolders};

use crate::client::ApiClient;

const COLLECTION: &str = "scenes/";
const FOLDERS: &str = "scenes/folders/";

/// Scenes stored on the backend.
#[derive(Debug, Clone)]
pub struct HttpSceneRepository {
    client: ApiClient,
}

impl HttpSceneRepository {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl SceneRepository for HttpSceneRepository {
    fn list(&self) -> impl Future<Output = Result<Vec<Scene>, VibraeError>> + Send {
        let client = self.client.clone();
        async move { Ok(client.get_json(COLLECTION).await?) }
    }

    fn create(&self, scene: &NewScene) -> impl Future<Output = Result<Scene, VibraeError>> + Send {
        let client = self.client.clone();
        let body = scene.clone();
        async move { Ok(client.send_json(Method::POST, COLLECTION, &body).await?) }
    }

    fn update(
        &self,
        id: SceneId,
        scene: &NewScene,
    ) -> impl Future<Output = Result<Scene, VibraeError>> + Send {
        let client = self.client.clone();
        let body = scene.clone();
        let path = format!("scenes/{id}/");
        async move { Ok(client.send_json(Method::PUT, &path, &body).await?) }
    }

    fn delete(&self, id: SceneId) -> impl Future<Output = Result<(), VibraeError>> + Send {
        let client = self.client.clone();
        let path = format!("scenes/{id}/");
        async move { Ok(client.send_empty(Method::DELETE, &path, &[]).await?) }
    }

    fn folders(&self) -> impl Future<Output = Result<SceneFolders, VibraeError>> + Send {
        let client = self.client.clone();
        async move { Ok(client.get_json(FOLDERS).await?) }
    }
}
