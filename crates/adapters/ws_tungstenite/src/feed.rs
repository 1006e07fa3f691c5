//! The background task keeping the push socket open.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt as _;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use vibrae_app::live::{LiveAction, LiveConnection, LiveEvent};
use vibrae_app::ports::TokenStore;
use vibrae_domain::player::PushMessage;
use vibrae_domain::session::AccessToken;

use crate::config::WsConfig;
use crate::endpoint::SocketEndpoint;
use crate::error::LiveError;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Handle on a running push feed.
///
/// Dropping the update receiver also ends the task.
#[derive(Debug)]
pub struct LiveFeed {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl LiveFeed {
    /// Spawn the feed and return it with the receiving end of its updates.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        endpoint: SocketEndpoint,
        config: &WsConfig,
        tokens: Arc<dyn TokenStore + Send + Sync>,
    ) -> (Self, mpsc::Receiver<PushMessage>) {
        let (updates_tx, updates_rx) = mpsc::channel(config.channel_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let driver = Driver {
            endpoint,
            tokens,
            reconnect_delay: config.reconnect_delay(),
            updates: updates_tx,
            shutdown: shutdown_rx,
        };
        let task = tokio::spawn(driver.run());
        (
            Self {
                shutdown: shutdown_tx,
                task,
            },
            updates_rx,
        )
    }

    /// Close the socket and wait for the task to finish.
    pub async fn stop(self) {
        // The task may already be gone if the receiver was dropped.
        let _ = self.shutdown.send(true);
        if let Err(err) = self.task.await {
            tracing::warn!(%err, "live feed task failed");
        }
    }
}

struct Driver {
    endpoint: SocketEndpoint,
    tokens: Arc<dyn TokenStore + Send + Sync>,
    reconnect_delay: Duration,
    updates: mpsc::Sender<PushMessage>,
    shutdown: watch::Receiver<bool>,
}

impl Driver {
    async fn run(mut self) {
        let mut live = LiveConnection::new(self.reconnect_delay);
        let mut next = live.handle(LiveEvent::Start);
        while let Some(action) = next {
            next = match action {
                LiveAction::Connect => self.session(&mut live).await,
                LiveAction::ScheduleReconnect(delay) => {
                    tracing::debug!(?delay, "live feed reconnect scheduled");
                    tokio::select! {
                        () = tokio::time::sleep(delay) => live.handle(LiveEvent::TimerFired),
                        () = stopped(&mut self.shutdown, &self.updates) => live.handle(LiveEvent::Stop),
                    }
                }
                LiveAction::CloseSocket => None,
            };
        }
        tracing::info!(reconnects = live.reconnects(), "live feed stopped");
    }

    /// One socket lifetime: connect, then forward frames until it drops.
    async fn session(&mut self, live: &mut LiveConnection) -> Option<LiveAction> {
        let mut socket = tokio::select! {
            result = connect(&self.endpoint, self.tokens.as_ref()) => match result {
                Ok(socket) => socket,
                Err(err) => {
                    tracing::warn!(%err, endpoint = self.endpoint.as_str(), "live feed connection failed");
                    return live.handle(LiveEvent::Errored);
                }
            },
            () = stopped(&mut self.shutdown, &self.updates) => return live.handle(LiveEvent::Stop),
        };
        tracing::info!(endpoint = self.endpoint.as_str(), "live feed connected");
        live.handle(LiveEvent::Opened);

        loop {
            tokio::select! {
                frame = socket.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        if !self.forward(text.as_str()).await {
                            close(&mut socket).await;
                            return live.handle(LiveEvent::Stop);
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("live feed closed by backend");
                        return live.handle(LiveEvent::Closed);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::warn!(%err, "live feed read failed");
                        return live.handle(LiveEvent::Errored);
                    }
                },
                () = stopped(&mut self.shutdown, &self.updates) => {
                    close(&mut socket).await;
                    return live.handle(LiveEvent::Stop);
                }
            }
        }
    }

    /// Returns `false` once nobody listens anymore.
    async fn forward(&self, text: &str) -> bool {
        let message = match serde_json::from_str::<PushMessage>(text) {
            Ok(PushMessage::Unknown) => {
                tracing::debug!("ignoring unknown push message");
                return true;
            }
            Ok(message) => message,
            Err(err) => {
                tracing::debug!(%err, "ignoring malformed push message");
                return true;
            }
        };
        self.updates.send(message).await.is_ok()
    }
}

/// Resolves once the owner stopped the feed or dropped the receiver.
async fn stopped(shutdown: &mut watch::Receiver<bool>, updates: &mpsc::Sender<PushMessage>) {
    let requested = async {
        while !*shutdown.borrow_and_update() {
            if shutdown.changed().await.is_err() {
                break;
            }
        }
    };
    tokio::select! {
        () = requested => {}
        () = updates.closed() => {}
    }
}

async fn connect(
    endpoint: &SocketEndpoint,
    tokens: &(dyn TokenStore + Send + Sync),
) -> Result<Socket, LiveError> {
    // Read on every attempt so a fresh login is picked up on reconnect.
    let token = match tokens.load() {
        Ok(token) => token.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(%err, "failed to read stored token");
            AccessToken::default()
        }
    };
    if token.is_blank() {
        tracing::debug!("connecting without a stored token");
    }
    let url = endpoint.with_token(&token);
    let (socket, _response) = tokio_tungstenite::connect_async(url.as_str()).await?;
    Ok(socket)
}

async fn close(socket: &mut Socket) {
    if let Err(err) = socket.close(None).await {
        tracing::debug!(%err, "live feed close handshake failed");
    }
}
