//! HTTP implementation of [`PlayerControl`] over `/control/`.

use std::future::Future;

use reqwest::Method;
use serde::Deserialize;
use vibrae_app::ports::PlayerControl;
use vibrae_domain::error::VibraeError;
use vibrae_domain::player::{BackendStatus, NowPlaying, Volume};

use crate::client::ApiClient;

#[derive(Debug, Deserialize)]
struct VolumeBody {
    volume: Volume,
}

/// Playback commands sent to the backend player.
#[derive(Debug, Clone)]
pub struct HttpPlayerControl {
    client: ApiClient,
}

impl HttpPlayerControl {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl PlayerControl for HttpPlayerControl {
    fn stop(&self) -> impl Future<Output = Result<(), VibraeError>> + Send {
        let client = self.client.clone();
        async move { Ok(client.send_empty(Method::POST, "control/stop", &[]).await?) }
    }

    fn resume(&self) -> impl Future<Output = Result<(), VibraeError>> + Send {
        let client = self.client.clone();
        async move { Ok(client.send_empty(Method::POST, "control/resume", &[]).await?) }
    }

    fn set_volume(&self, volume: Volume) -> impl Future<Output = Result<(), VibraeError>> + Send {
        let client = self.client.clone();
        let query = [("level", volume.get().to_string())];
        async move { Ok(client.send_empty(Method::POST, "control/volume", &query).await?) }
    }

    fn now_playing(&self) -> impl Future<Output = Result<NowPlaying, VibraeError>> + Send {
        let client = self.client.clone();
        async move { Ok(client.post_for_json("control/now_playing").await?) }
    }

    fn volume(&self) -> impl Future<Output = Result<Volume, VibraeError>> + Send {
        let client = self.client.clone();
        async move {
            let body: VolumeBody = client.post_for_json("control/get_volume").await?;
            Ok(body.volume)
        }
    }

    fn status(&self) -> impl Future<Output = Result<BackendStatus, VibraeError>> + Send {
        let client = self.client.clone();
        async move { Ok(client.get_public("control/status").await?) }
    }
}
