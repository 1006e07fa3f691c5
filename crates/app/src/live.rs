//! Live connection state machine for the push socket.
//!
//! Pure transitions only; the WebSocket adapter feeds it events and carries
//! out the returned actions. Reconnects use a fixed delay with no cap on
//! attempts.

use std::time::Duration;

/// Delay before reconnecting after a close or error.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveState {
    Closed,
    Connecting,
    Open,
    Reconnecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveEvent {
    /// The owner wants updates (screen mounted).
    Start,
    Opened,
    Closed,
    Errored,
    /// The reconnect delay elapsed.
    TimerFired,
    /// The owner no longer wants updates (screen unmounted).
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveAction {
    Connect,
    ScheduleReconnect(Duration),
    CloseSocket,
}

#[derive(Debug, Clone)]
pub struct LiveConnection {
    state: LiveState,
    reconnect_delay: Duration,
    reconnects: u64,
}

impl Default for LiveConnection {
    fn default() -> Self {
        Self::new(DEFAULT_RECONNECT_DELAY)
    }
}

impl LiveConnection {
    #[must_use]
    pub fn new(reconnect_delay: Duration) -> Self {
        Self {
            state: LiveState::Closed,
            reconnect_delay,
            reconnects: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> LiveState {
        self.state
    }

    /// Number of reconnects scheduled since creation.
    #[must_use]
    pub fn reconnects(&self) -> u64 {
        self.reconnects
    }

    /// Apply `event` and return the side effect to perform, if any.
    ///
    /// Pairs without a transition leave the state unchanged.
    pub fn handle(&mut self, event: LiveEvent) -> Option<LiveAction> {
        use LiveEvent as E;
        use LiveState as S;

        let (next, action) = match (self.state, event) {
            (_, E::Stop) => (S::Closed, Some(LiveAction::CloseSocket)),
            (S::Closed, E::Start) => (S::Connecting, Some(LiveAction::Connect)),
            (S::Connecting, E::Opened) => (S::Open, None),
            (S::Connecting | S::Open, E::Closed | E::Errored) => {
                self.reconnects += 1;
                (
                    S::Reconnecting,
                    Some(LiveAction::ScheduleReconnect(self.reconnect_delay)),
                )
            }
            (S::Reconnecting, E::TimerFired) => (S::Connecting, Some(LiveAction::Connect)),
            (state, _) => (state, None),
        };

        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, ?event, "live connection transition");
        }
        self.state = next;
        action
    }
}
