use std::time::Duration;

use serde::Deserialize;
use vibrae_app::live::DEFAULT_RECONNECT_DELAY;

/// Push socket settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WsConfig {
    /// Seconds to wait before reconnecting after the socket drops.
    pub reconnect_delay_secs: u64,
    /// Capacity of the update channel handed to the consumer.
    pub channel_capacity: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            reconnect_delay_secs: DEFAULT_RECONNECT_DELAY.as_secs(),
            channel_capacity: 32,
        }
    }
}

impl WsConfig {
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}
