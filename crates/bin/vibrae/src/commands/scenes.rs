use clap::Subcommand;
use vibrae_domain::error::{NotFoundError, VibraeError};
use vibrae_domain::id::SceneId;
use vibrae_domain::scene::NewScene;

use super::CommandResult;
use crate::context::Context;
use crate::render;

#[derive(Debug, Subcommand)]
pub enum ScenesAction {
    /// List scenes
    List,
    /// Create a scene playing the files of a folder
    Add {
        #[arg(long)]
        name: String,
        /// Folder on the backend, see `scenes folders`.
        #[arg(long)]
        path: String,
    },
    /// Rename a scene or point it at another folder
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        path: Option<String>,
    },
    /// Delete a scene
    Delete { id: i64 },
    /// List the music folders a scene can use
    Folders,
}

pub async fn run(ctx: &Context, action: ScenesAction) -> CommandResult {
    let scenes = ctx.scenes();
    match action {
        ScenesAction::List => {
            let listed = scenes.refresh().await?;
            if listed.is_empty() {
                println!("no scenes");
            }
            for scene in &listed {
                println!("{}", render::scene_row(scene));
            }
        }
        ScenesAction::Add { name, path } => {
            let created = scenes.create(&NewScene::new(&name, &path)?).await?;
            println!("created scene #{} ({})", created.id, created.name);
        }
        ScenesAction::Edit { id, name, path } => {
            let id = SceneId::new(id);
            let current = scenes
                .refresh()
                .await?
                .into_iter()
                .find(|s| s.id == id)
                .ok_or_else(|| NotFoundError {
                    entity: "Scene",
                    id: id.to_string(),
                })
                .map_err(VibraeError::from)?;
            let scene = NewScene::new(
                name.as_deref().unwrap_or(&current.name),
                path.as_deref().unwrap_or(&current.path),
            )?;
            scenes.update(id, &scene).await?;
            println!("updated scene #{id}");
        }
        ScenesAction::Delete { id } => {
            scenes.delete(SceneId::new(id)).await?;
            println!("deleted scene #{id}");
        }
        ScenesAction::Folders => {
            let folders = scenes.folders().await?;
            if folders.folders.is_empty() {
                println!("no folders");
            }
            for folder in folders.folders {
                println!("{folder}");
            }
        }
    }
    Ok(())
}
