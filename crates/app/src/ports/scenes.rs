//! Scene port: the backend's `/scenes/` collection.

use std::future::Future;

use vibrae_domain::error::VibraeError;
use vibrae_domain::id::SceneId;
use vibrae_domain::scene::{NewScene, Scene, SceneFolders};

pub trait SceneRepository {
    fn list(&self) -> impl Future<Output = Result<Vec<Scene>, VibraeError>> + Send;

    fn create(&self, scene: &NewScene) -> impl Future<Output = Result<Scene, VibraeError>> + Send;

    fn update(
        &self,
        id: SceneId,
        scene: &NewScene,
    ) -> impl Future<Output = Result<Scene, VibraeError>> + Send;

    fn delete(&self, id: SceneId) -> impl Future<Output = Result<(), VibraeError>> + Send;

    /// Music folders a scene path may point at.
    fn folders(&self) -> impl Future<Output = Result<SceneFolders, VibraeError>> + Send;
}
