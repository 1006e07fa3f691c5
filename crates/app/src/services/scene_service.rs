//! Scene service: scene CRUD with a local cache.

use tokio::sync::RwLock;
use vibrae_domain::error::VibraeError;
use vibrae_domain::id::SceneId;
use vibrae_domain::scene::{self, NewScene, Scene, SceneFolders};

use crate::ports::SceneRepository;

pub struct SceneService<R> {
    repo: R,
    cache: RwLock<Vec<Scene>>,
}

impl<R: SceneRepository> SceneService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            cache: RwLock::new(Vec::new()),
        }
    }

    /// # Errors
    ///
    /// Returns the repository error; the cache is left untouched.
    pub async fn refresh(&self) -> Result<Vec<Scene>, VibraeError> {
        let scenes = self.repo.list().await?;
        tracing::debug!(count = scenes.len(), "scenes refreshed");
        *self.cache.write().await = scenes.clone();
        Ok(scenes)
    }

    /// Refresh after a committed write. A failed reload keeps the stale list
    /// so the write itself is never reported as failed.
    async fn resync(&self) {
        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, "could not reload scenes after a change");
        }
    }

    pub async fn cached(&self) -> Vec<Scene> {
        self.cache.read().await.clone()
    }

    /// # Errors
    ///
    /// Returns [`VibraeError::Validation`] for a blank name or path, or a
    /// backend error from the repository.
    #[tracing::instrument(skip(self, scene), fields(name = %scene.name))]
    pub async fn create(&self, scene: &NewScene) -> Result<Scene, VibraeError> {
        scene.validate()?;
        let created = self.repo.create(scene).await?;
        tracing::info!(id = %created.id, "scene created");
        self.resync().await;
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`VibraeError::Validation`] for a blank name or path, or a
    /// backend error from the repository.
    #[tracing::instrument(skip(self, scene))]
    pub async fn update(&self, id: SceneId, scene: &NewScene) -> Result<Scene, VibraeError> {
        scene.validate()?;
        let updated = self.repo.update(id, scene).await?;
        tracing::info!("scene updated");
        self.resync().await;
        Ok(updated)
    }

    /// Delete a scene. Routines pointing at it stay and show no scene name.
    ///
    /// # Errors
    ///
    /// Returns a backend error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: SceneId) -> Result<(), VibraeError> {
        self.repo.delete(id).await?;
        tracing::info!("scene deleted");
        self.resync().await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a backend error from the repository.
    pub async fn folders(&self) -> Result<SceneFolders, VibraeError> {
        self.repo.folders().await
    }

    /// Name of a cached scene, empty when unknown.
    pub async fn scene_name(&self, id: SceneId) -> String {
        scene::scene_name(&self.cache.read().await, id).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use vibrae_domain::error::ValidationError;

    #[derive(Default)]
    struct InMemorySceneRepo {
        store: Mutex<Vec<Scene>>,
        fail_list: AtomicBool,
    }

    impl SceneRepository for InMemorySceneRepo {
        fn list(&self) -> impl Future<Output = Result<Vec<Scene>, VibraeError>> + Send {
            let result = if self.fail_list.load(Ordering::SeqCst) {
                Err(VibraeError::Backend("listing failed".into()))
            } else {
                Ok(self.store.lock().unwrap().clone())
            };
            async { result }
        }

        fn create(
            &self,
            scene: &NewScene,
        ) -> impl Future<Output = Result<Scene, VibraeError>> + Send {
            let mut store = self.store.lock().unwrap();
            let created = Scene {
                id: SceneId::new(i64::try_from(store.len()).unwrap() + 1),
                name: scene.name.clone(),
                path: scene.path.clone(),
            };
            store.push(created.clone());
            async { Ok(created) }
        }

        fn update(
            &self,
            id: SceneId,
            scene: &NewScene,
        ) -> impl Future<Output = Result<Scene, VibraeError>> + Send {
            let mut store = self.store.lock().unwrap();
            let slot = store.iter_mut().find(|s| s.id == id).unwrap();
            slot.name = scene.name.clone();
            slot.path = scene.path.clone();
            let updated = slot.clone();
            async { Ok(updated) }
        }

        fn delete(&self, id: SceneId) -> impl Future<Output = Result<(), VibraeError>> + Send {
            self.store.lock().unwrap().retain(|s| s.id != id);
            async { Ok(()) }
        }

        fn folders(&self) -> impl Future<Output = Result<SceneFolders, VibraeError>> + Send {
            async {
                Ok(SceneFolders {
                    folders: vec!["birds".to_string(), "rain".to_string()],
                })
            }
        }
    }

    fn make_service() -> SceneService<InMemorySceneRepo> {
        SceneService::new(InMemorySceneRepo::default())
    }

    #[tokio::test]
    async fn should_create_scene_and_resolve_its_name() {
        let svc = make_service();
        let created = svc
            .create(&NewScene::new("Birds", "birds").unwrap())
            .await
            .unwrap();

        assert_eq!(svc.cached().await.len(), 1);
        assert_eq!(svc.scene_name(created.id).await, "Birds");
        assert_eq!(svc.scene_name(SceneId::new(42)).await, "");
    }

    #[tokio::test]
    async fn should_keep_created_scene_when_reload_fails() {
        let svc = make_service();
        svc.repo.fail_list.store(true, Ordering::SeqCst);

        let created = svc
            .create(&NewScene::new("Birds", "birds").unwrap())
            .await
            .unwrap();
        assert_eq!(created.name, "Birds");
        assert_eq!(svc.repo.store.lock().unwrap().len(), 1);
        assert!(svc.cached().await.is_empty());
    }

    #[tokio::test]
    async fn should_reject_blank_name() {
        let svc = make_service();
        let bad = NewScene {
            name: " ".to_string(),
            path: "birds".to_string(),
        };
        let result = svc.create(&bad).await;
        assert!(matches!(
            result,
            Err(VibraeError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_update_scene() {
        let svc = make_service();
        let created = svc
            .create(&NewScene::new("Birds", "birds").unwrap())
            .await
            .unwrap();
        svc.update(created.id, &NewScene::new("Rain", "rain").unwrap())
            .await
            .unwrap();
        assert_eq!(svc.scene_name(created.id).await, "Rain");
    }

    #[tokio::test]
    async fn should_delete_scene() {
        let svc = make_service();
        let created = svc
            .create(&NewScene::new("Birds", "birds").unwrap())
            .await
            .unwrap();
        svc.delete(created.id).await.unwrap();
        assert!(svc.cached().await.is_empty());
    }

    #[tokio::test]
    async fn should_list_folders() {
        let svc = make_service();
        let folders = svc.folders().await.unwrap();
        assert_eq!(folders.folders, vec!["birds", "rain"]);
    }
}
