//! Control service: playback commands for the home screen.

use chrono::NaiveDateTime;
use vibrae_domain::error::VibraeError;
use vibrae_domain::player::{BackendStatus, NowPlaying, Volume};

use crate::ports::{PlayerControl, RoutineRepository};
use crate::services::RoutineService;

pub struct ControlService<P> {
    player: P,
}

impl<P: PlayerControl> ControlService<P> {
    pub fn new(player: P) -> Self {
        Self { player }
    }

    /// # Errors
    ///
    /// Returns a backend error from the player port.
    #[tracing::instrument(skip(self))]
    pub async fn stop(&self) -> Result<(), VibraeError> {
        self.player.stop().await?;
        tracing::info!("playback stopped");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a backend error from the player port.
    #[tracing::instrument(skip(self))]
    pub async fn resume(&self) -> Result<(), VibraeError> {
        self.player.resume().await?;
        tracing::info!("schedule resumed");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a backend error from the player port.
    #[tracing::instrument(skip(self), fields(volume = volume.get()))]
    pub async fn set_volume(&self, volume: Volume) -> Result<(), VibraeError> {
        self.player.set_volume(volume).await?;
        tracing::info!("volume set");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a backend error from the player port.
    pub async fn now_playing(&self) -> Result<NowPlaying, VibraeError> {
        self.player.now_playing().await
    }

    /// # Errors
    ///
    /// Returns a backend error from the player port.
    pub async fn volume(&self) -> Result<Volume, VibraeError> {
        self.player.volume().await
    }

    /// # Errors
    ///
    /// Returns a backend error from the player port.
    pub async fn status(&self) -> Result<BackendStatus, VibraeError> {
        self.player.status().await
    }

    /// Whether some routine covers `now`, using a fresh routine list.
    ///
    /// Drives the "resume" affordance shown when nothing is playing.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the routine list cannot be fetched.
    pub async fn should_be_playing<R: RoutineRepository>(
        &self,
        routines: &RoutineService<R>,
        now: NaiveDateTime,
    ) -> Result<bool, VibraeError> {
        routines.refresh().await?;
        Ok(routines.active_now(now).await.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;
    use vibrae_domain::id::{RoutineId, SceneId};
    use vibrae_domain::player::BackendStatusDetails;
    use vibrae_domain::routine::{Routine, RoutineDraft};

    #[derive(Default)]
    struct RecordingPlayer {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingPlayer {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    impl PlayerControl for RecordingPlayer {
        fn stop(&self) -> impl Future<Output = Result<(), VibraeError>> + Send {
            self.record("stop");
            async { Ok(()) }
        }

        fn resume(&self) -> impl Future<Output = Result<(), VibraeError>> + Send {
            self.record("resume");
            async { Ok(()) }
        }

        fn set_volume(
            &self,
            volume: Volume,
        ) -> impl Future<Output = Result<(), VibraeError>> + Send {
            self.record(format!("volume={}", volume.get()));
            async { Ok(()) }
        }

        fn now_playing(&self) -> impl Future<Output = Result<NowPlaying, VibraeError>> + Send {
            async {
                Ok(NowPlaying {
                    now_playing: Some("/music/birds/robin.mp3".to_string()),
                })
            }
        }

        fn volume(&self) -> impl Future<Output = Result<Volume, VibraeError>> + Send {
            async { Ok(Volume::new(35)?) }
        }

        fn status(&self) -> impl Future<Output = Result<BackendStatus, VibraeError>> + Send {
            async {
                Ok(BackendStatus {
                    status: "online".to_string(),
                    details: BackendStatusDetails::default(),
                })
            }
        }
    }

    struct FixedRoutines(Vec<Routine>);

    impl RoutineRepository for FixedRoutines {
        fn list(&self) -> impl Future<Output = Result<Vec<Routine>, VibraeError>> + Send {
            let result = self.0.clone();
            async { Ok(result) }
        }

        fn create(
            &self,
            _draft: &RoutineDraft,
        ) -> impl Future<Output = Result<Routine, VibraeError>> + Send {
            async { Err(VibraeError::Unauthenticated) }
        }

        fn update(
            &self,
            _id: RoutineId,
            _draft: &RoutineDraft,
        ) -> impl Future<Output = Result<Routine, VibraeError>> + Send {
            async { Err(VibraeError::Unauthenticated) }
        }

        fn delete(&self, _id: RoutineId) -> impl Future<Output = Result<(), VibraeError>> + Send {
            async { Err(VibraeError::Unauthenticated) }
        }
    }

    fn morning() -> Routine {
        Routine {
            id: RoutineId::new(1),
            scene_id: SceneId::new(1),
            start_time: "08:00".to_string(),
            end_time: "10:00".to_string(),
            volume: 40,
            weekdays: None,
            months: None,
        }
    }

    fn at(hour: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 6, 14)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn should_forward_commands_to_player() {
        let svc = ControlService::new(RecordingPlayer::default());
        svc.stop().await.unwrap();
        svc.resume().await.unwrap();
        svc.set_volume(Volume::new(80).unwrap()).await.unwrap();

        let calls = svc.player.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["stop", "resume", "volume=80"]);
    }

    #[tokio::test]
    async fn should_report_now_playing_and_volume() {
        let svc = ControlService::new(RecordingPlayer::default());
        let playing = svc.now_playing().await.unwrap();
        assert_eq!(playing.now_playing.as_deref(), Some("/music/birds/robin.mp3"));
        assert_eq!(svc.volume().await.unwrap().get(), 35);
        assert!(svc.status().await.unwrap().is_online());
    }

    #[tokio::test]
    async fn should_detect_when_schedule_should_be_playing() {
        let svc = ControlService::new(RecordingPlayer::default());
        let routines = RoutineService::new(FixedRoutines(vec![morning()]));

        assert!(svc.should_be_playing(&routines, at(9)).await.unwrap());
        assert!(!svc.should_be_playing(&routines, at(11)).await.unwrap());
    }
}
