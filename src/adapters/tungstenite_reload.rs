//! Tungstenite-based live-reload channel adapter.
//!
//! Each call to [`ReloadChannelConnector::open`] spawns one connection task.
//! The task never reconnects on its own: reconnecting is the connection
//! monitor's decision, made after a fresh liveness probe.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::NetworkError;
use crate::traits::{ChannelEvent, ReloadChannelConnector};

/// Live-reload channel over a WebSocket, using tokio-tungstenite.
#[derive(Debug, Clone)]
pub struct TungsteniteReloadChannel {
    /// Capacity of the event queue handed to the monitor.
    capacity: usize,
}

impl TungsteniteReloadChannel {
    /// Create a connector with the default event queue capacity.
    pub fn new() -> Self {
        Self { capacity: 16 }
    }

    /// Create a connector with a specific event queue capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }
}

impl Default for TungsteniteReloadChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadChannelConnector for TungsteniteReloadChannel {
    fn open(&self, url: &Url) -> mpsc::Receiver<ChannelEvent> {
        let (tx, rx) = mpsc::channel(self.capacity);
        tokio::spawn(run_channel(url.to_string(), tx));
        rx
    }
}

/// Drive one WebSocket connection until it closes or the receiver is dropped.
async fn run_channel(url: String, events: mpsc::Sender<ChannelEvent>) {
    let ws_stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            let failure = channel_failure(&url, &e);
            warn!("{} ({})", failure, failure.error_code());
            let _ = events.send(ChannelEvent::Closed).await;
            return;
        }
    };

    info!("Live-reload channel open at {}", url);
    if events.send(ChannelEvent::Opened).await.is_err() {
        return;
    }

    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    loop {
        tokio::select! {
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!("Live-reload message: {}", text);
                        if events.send(ChannelEvent::Message(text)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Binary(data))) => {
                        let text = String::from_utf8_lossy(&data).into_owned();
                        if events.send(ChannelEvent::Message(text)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        debug!("Received ping, sending pong");
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Received close frame from backend");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Pong and raw frames carry nothing for us
                    }
                    Some(Err(e)) => {
                        let failure = channel_failure(&url, &e);
                        error!("{} ({})", failure, failure.error_code());
                        break;
                    }
                    None => {
                        info!("Live-reload stream ended");
                        break;
                    }
                }
            }
            _ = events.closed() => {
                debug!("Monitor dropped the live-reload channel, closing");
                let _ = ws_sink.close().await;
                return;
            }
        }
    }

    let _ = events.send(ChannelEvent::Closed).await;
}

fn channel_failure(url: &str, err: &tungstenite::Error) -> NetworkError {
    NetworkError::ChannelFailed {
        url: url.to_string(),
        message: err.to_string(),
    }
}
