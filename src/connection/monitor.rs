//! Connection monitor driver.
//!
//! Runs the heartbeat probe and the live-reload channel against
//! [`MonitorState`] until the page has to be reloaded.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use url::Url;

use super::heartbeat::HeartbeatProbe;
use super::state::{ChannelDecision, ConnectionState, MonitorState, ProbeDecision};
use crate::traits::{ChannelEvent, HttpClient, ReloadChannelConnector};

/// Notifications for the navigator side after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// The live-reload channel closed; the backend is being probed.
    Offline,
    /// The backend is reachable again and no reload is needed.
    Resumed,
}

/// Why a full reload was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadReason {
    /// The backend pushed a message on the live-reload channel.
    Pushed,
    /// The backend came back after a channel that had opened was lost.
    Reconnected,
}

/// How the monitor finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorExit {
    Reload(ReloadReason),
}

/// Receiving ends of a spawned monitor.
pub struct MonitorHandle {
    /// Resolved once, on the first successful probe.
    pub startup: oneshot::Receiver<()>,
    pub events: mpsc::UnboundedReceiver<MonitorEvent>,
    pub state: watch::Receiver<ConnectionState>,
    pub task: JoinHandle<MonitorExit>,
}

pub struct ConnectionMonitor<C: HttpClient, R: ReloadChannelConnector> {
    probe: HeartbeatProbe<C>,
    connector: Arc<R>,
    channel_url: Url,
    machine: MonitorState,
    state_tx: watch::Sender<ConnectionState>,
}

impl<C, R> ConnectionMonitor<C, R>
where
    C: HttpClient + 'static,
    R: ReloadChannelConnector + 'static,
{
    pub fn new(probe: HeartbeatProbe<C>, connector: Arc<R>, channel_url: Url) -> Self {
        let machine = MonitorState::new();
        let (state_tx, _) = watch::channel(machine.state());
        Self {
            probe,
            connector,
            channel_url,
            machine,
            state_tx,
        }
    }

    /// Subscribe to connection state changes.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// Run on a background task.
    pub fn spawn(self) -> MonitorHandle {
        let (startup_tx, startup) = oneshot::channel();
        let (events_tx, events) = mpsc::unbounded_channel();
        let state = self.subscribe();
        let task = tokio::spawn(self.run(startup_tx, events_tx));
        MonitorHandle {
            startup,
            events,
            state,
            task,
        }
    }

    /// Drive the monitor until a reload is required.
    ///
    /// `startup` fires on the first successful probe and never again.
    pub async fn run(
        mut self,
        startup: oneshot::Sender<()>,
        events: mpsc::UnboundedSender<MonitorEvent>,
    ) -> MonitorExit {
        let mut startup = Some(startup);

        loop {
            self.probe.await_online().await;

            match self.machine.on_probe_success() {
                ProbeDecision::Reload => {
                    info!("Backend restarted, reloading");
                    return MonitorExit::Reload(ReloadReason::Reconnected);
                }
                ProbeDecision::Startup => {
                    info!("Backend online at {}", self.probe.url());
                    self.publish();
                    if let Some(tx) = startup.take() {
                        let _ = tx.send(());
                    }
                }
                ProbeDecision::Resume => {
                    info!("Backend reachable again, resuming");
                    self.publish();
                    let _ = events.send(MonitorEvent::Resumed);
                }
            }

            let mut channel = self.connector.open(&self.channel_url);
            loop {
                // A dropped sender means the channel is gone.
                let event = channel.recv().await.unwrap_or(ChannelEvent::Closed);
                match self.machine.on_channel_event(&event) {
                    ChannelDecision::Continue => {
                        debug!("Live-reload channel {:?}", event);
                    }
                    ChannelDecision::Reload => {
                        info!("Backend announced new data, reloading");
                        return MonitorExit::Reload(ReloadReason::Pushed);
                    }
                    ChannelDecision::Reprobe => {
                        info!("Live-reload channel closed, waiting for backend");
                        self.publish();
                        let _ = events.send(MonitorEvent::Offline);
                        break;
                    }
                }
            }
        }
    }

    fn publish(&self) {
        let _ = self.state_tx.send(self.machine.state());
    }
}
