//! Playback state pushed by the backend and the control values sent to it.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VibraeError};

/// A message received on the `/control/ws` socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushMessage {
    NowPlaying {
        #[serde(default)]
        now_playing: Option<String>,
    },
    Volume {
        volume: u8,
    },
    #[serde(other)]
    Unknown,
}

/// Playback volume in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Volume(u8);

impl Volume {
    pub const MAX: u8 = 100;

    /// # Errors
    ///
    /// Returns [`ValidationError::VolumeOutOfRange`] outside `0..=100`.
    pub fn new(level: i64) -> Result<Self, ValidationError> {
        u8::try_from(level)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(ValidationError::VolumeOutOfRange(level))
    }

    /// Round a slider position to the nearest whole percent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::VolumeOutOfRange`] when the rounded value is
    /// outside `0..=100` or the input is not finite.
    pub fn from_slider(position: f64) -> Result<Self, VibraeError> {
        if !position.is_finite() {
            return Err(ValidationError::VolumeOutOfRange(i64::MIN).into());
        }
        #[allow(clippy::cast_possible_truncation)]
        let rounded = position.round() as i64;
        Ok(Self::new(rounded)?)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Volume {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Volume> for u8 {
    fn from(value: Volume) -> Self {
        value.0
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Response of `POST /control/now_playing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    #[serde(default)]
    pub now_playing: Option<String>,
}

/// Response of `GET /control/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub status: String,
    #[serde(default)]
    pub details: BackendStatusDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatusDetails {
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub scheduler: String,
}

impl BackendStatus {
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// What the home screen shows: current track and volume.
///
/// `loaded` flips once the first relevant push arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStatus {
    pub now_playing: Option<String>,
    pub volume: Option<u8>,
    pub loaded: bool,
}

impl PlayerStatus {
    /// Fold a push message into the status. Returns `false` for messages
    /// that carry nothing relevant.
    pub fn apply(&mut self, message: &PushMessage) -> bool {
        match message {
            PushMessage::NowPlaying { now_playing } => {
                self.now_playing = now_playing.clone().filter(|p| !p.is_empty());
            }
            PushMessage::Volume { volume } => self.volume = Some(*volume),
            PushMessage::Unknown => return false,
        }
        self.loaded = true;
        true
    }

    /// The file name of the playing track, without its directory.
    #[must_use]
    pub fn track_name(&self) -> Option<&str> {
        self.now_playing.as_deref().and_then(track_name)
    }

    /// Forget the current track after a stop, and wait for the next push.
    pub fn clear_track(&mut self) {
        self.now_playing = None;
        self.loaded = false;
    }
}

/// Last `/`-separated segment of a playing path, `None` when it is empty.
#[must_use]
pub fn track_name(path: &str) -> Option<&str> {
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_now_playing_message() {
        let msg: PushMessage =
            serde_json::from_str(r#"{"type":"now_playing","now_playing":"/music/birds/robin.mp3"}"#)
                .unwrap();
        assert_eq!(
            msg,
            PushMessage::NowPlaying {
                now_playing: Some("/music/birds/robin.mp3".to_string())
            }
        );
    }

    #[test]
    fn should_parse_null_now_playing() {
        let msg: PushMessage =
            serde_json::from_str(r#"{"type":"now_playing","now_playing":null}"#).unwrap();
        assert_eq!(msg, PushMessage::NowPlaying { now_playing: None });
    }

    #[test]
    fn should_parse_volume_message() {
        let msg: PushMessage = serde_json::from_str(r#"{"type":"volume","volume":42}"#).unwrap();
        assert_eq!(msg, PushMessage::Volume { volume: 42 });
    }

    #[test]
    fn should_map_unknown_type_to_unknown() {
        let msg: PushMessage = serde_json::from_str(r#"{"type":"heartbeat"}"#).unwrap();
        assert_eq!(msg, PushMessage::Unknown);
    }

    #[test]
    fn should_apply_relevant_messages_only() {
        let mut status = PlayerStatus::default();
        assert!(!status.apply(&PushMessage::Unknown));
        assert!(!status.loaded);

        assert!(status.apply(&PushMessage::NowPlaying {
            now_playing: Some("/a/b/song.ogg".to_string())
        }));
        assert!(status.apply(&PushMessage::Volume { volume: 70 }));
        assert!(status.loaded);
        assert_eq!(status.track_name(), Some("song.ogg"));
        assert_eq!(status.volume, Some(70));

        status.apply(&PushMessage::NowPlaying { now_playing: None });
        assert_eq!(status.track_name(), None);
    }

    #[test]
    fn should_extract_track_name() {
        assert_eq!(track_name("song.mp3"), Some("song.mp3"));
        assert_eq!(track_name("/x/y/z.mp3"), Some("z.mp3"));
        assert_eq!(track_name("/x/y/"), None);
    }

    #[test]
    fn should_validate_volume_range() {
        assert_eq!(Volume::new(0).unwrap().get(), 0);
        assert_eq!(Volume::new(100).unwrap().get(), 100);
        assert_eq!(
            Volume::new(101),
            Err(ValidationError::VolumeOutOfRange(101))
        );
        assert_eq!(Volume::new(-5), Err(ValidationError::VolumeOutOfRange(-5)));
    }

    #[test]
    fn should_round_slider_position() {
        assert_eq!(Volume::from_slider(49.6).unwrap().get(), 50);
        assert_eq!(Volume::from_slider(100.4).unwrap().get(), 100);
        assert!(Volume::from_slider(100.6).is_err());
        assert!(Volume::from_slider(f64::NAN).is_err());
    }

    #[test]
    fn should_report_backend_online() {
        let status: BackendStatus = serde_json::from_str(
            r#"{"status":"online","details":{"player":"online","scheduler":"online"}}"#,
        )
        .unwrap();
        assert!(status.is_online());
    }
}
