//! Player control port: the backend's `/control/` endpoints.

use std::future::Future;

use vibrae_domain::error::VibraeError;
use vibrae_domain::player::{BackendStatus, NowPlaying, Volume};

pub trait PlayerControl {
    /// Stop playback until the schedule resumes it.
    fn stop(&self) -> impl Future<Output = Result<(), VibraeError>> + Send;

    /// Ask the backend scheduler to play whatever should be playing now.
    fn resume(&self) -> impl Future<Output = Result<(), VibraeError>> + Send;

    fn set_volume(&self, volume: Volume) -> impl Future<Output = Result<(), VibraeError>> + Send;

    fn now_playing(&self) -> impl Future<Output = Result<NowPlaying, VibraeError>> + Send;

    fn volume(&self) -> impl Future<Output = Result<Volume, VibraeError>> + Send;

    /// Player and scheduler health. Does not require a session.
    fn status(&self) -> impl Future<Output = Result<BackendStatus, VibraeError>> + Send;
}
