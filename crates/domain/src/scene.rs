//! Scene: a named reference to an audio folder managed by the backend.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VibraeError};
use crate::id::SceneId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    pub path: String,
}

/// Create/update body for `POST /scenes/` and `PUT /scenes/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScene {
    pub name: String,
    pub path: String,
}

impl NewScene {
    /// Build a scene body with trimmed fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] for a blank name and
    /// [`ValidationError::EmptyField`] for a blank path.
    pub fn new(name: &str, path: &str) -> Result<Self, VibraeError> {
        let scene = Self {
            name: name.trim().to_string(),
            path: path.trim().to_string(),
        };
        scene.validate()?;
        Ok(scene)
    }

    /// # Errors
    ///
    /// See [`NewScene::new`].
    pub fn validate(&self) -> Result<(), VibraeError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.path.trim().is_empty() {
            return Err(ValidationError::EmptyField("path").into());
        }
        Ok(())
    }
}

/// Audio folders available on the backend (`GET /scenes/folders/`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneFolders {
    #[serde(default)]
    pub folders: Vec<String>,
}

/// Look up a scene name by id, empty when the scene is unknown.
#[must_use]
pub fn scene_name(scenes: &[Scene], id: SceneId) -> &str {
    scenes
        .iter()
        .find(|s| s.id == id)
        .map_or("", |s| s.name.as_str())
}
