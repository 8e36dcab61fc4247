//! Mock live-reload channel for testing.
//!
//! Each call to `open` consumes one scripted session. A session whose script
//! ends with [`ChannelEvent::Closed`] is finished immediately; any other
//! session stays open so the test can push more events with [`MockReloadChannel::emit`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use url::Url;

use crate::traits::{ChannelEvent, ReloadChannelConnector};

/// Mock live-reload channel connector.
///
/// # Example
///
/// ```ignore
/// use crashview::adapters::mock::MockReloadChannel;
/// use crashview::traits::ChannelEvent;
///
/// let channel = MockReloadChannel::new();
/// // First session opens and then drops, second one stays quiet.
/// channel.push_session(vec![ChannelEvent::Opened, ChannelEvent::Closed]);
/// channel.push_session(vec![ChannelEvent::Opened]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockReloadChannel {
    /// Scripted sessions, consumed one per `open`
    sessions: Arc<Mutex<VecDeque<Vec<ChannelEvent>>>>,
    /// Senders of sessions that are still open
    live: Arc<Mutex<Vec<mpsc::Sender<ChannelEvent>>>>,
    /// URLs passed to `open`, in call order
    opened: Arc<Mutex<Vec<Url>>>,
}

impl MockReloadChannel {
    /// Create a connector with no scripted sessions.
    ///
    /// Unscripted opens produce a channel that stays silent until
    /// [`emit`](Self::emit) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events of the next session.
    pub fn push_session(&self, events: Vec<ChannelEvent>) {
        self.sessions.lock().unwrap().push_back(events);
    }

    /// Push an event into the most recently opened session.
    ///
    /// Returns false if no session is open or its receiver is gone.
    pub fn emit(&self, event: ChannelEvent) -> bool {
        let mut live = self.live.lock().unwrap();
        let Some(tx) = live.last() else {
            return false;
        };
        let closing = event == ChannelEvent::Closed;
        let sent = tx.try_send(event).is_ok();
        if closing {
            live.pop();
        }
        sent
    }

    /// Number of times `open` was called.
    pub fn open_count(&self) -> usize {
        self.opened.lock().unwrap().len()
    }

    /// URLs passed to `open`, in call order.
    pub fn opened_urls(&self) -> Vec<Url> {
        self.opened.lock().unwrap().clone()
    }
}

impl ReloadChannelConnector for MockReloadChannel {
    fn open(&self, url: &Url) -> mpsc::Receiver<ChannelEvent> {
        self.opened.lock().unwrap().push(url.clone());

        let (tx, rx) = mpsc::channel(64);
        let script = self.sessions.lock().unwrap().pop_front();
        let mut finished = false;
        if let Some(events) = script {
            for event in events {
                finished = event == ChannelEvent::Closed;
                let _ = tx.try_send(event);
                if finished {
                    break;
                }
            }
        }

        if !finished {
            self.live.lock().unwrap().push(tx);
        }
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws_url() -> Url {
        Url::parse("ws://localhost:8080/websocket").unwrap()
    }

    #[tokio::test]
    async fn test_scripted_session_ends_with_closed() {
        let channel = MockReloadChannel::new();
        channel.push_session(vec![ChannelEvent::Opened, ChannelEvent::Closed]);

        let mut rx = channel.open(&ws_url());
        assert_eq!(rx.recv().await, Some(ChannelEvent::Opened));
        assert_eq!(rx.recv().await, Some(ChannelEvent::Closed));
        assert_eq!(rx.recv().await, None);
        assert!(!channel.emit(ChannelEvent::Opened));
    }

    #[tokio::test]
    async fn test_open_session_accepts_emitted_events() {
        let channel = MockReloadChannel::new();
        channel.push_session(vec![ChannelEvent::Opened]);

        let mut rx = channel.open(&ws_url());
        assert_eq!(rx.recv().await, Some(ChannelEvent::Opened));

        assert!(channel.emit(ChannelEvent::Message("reload".to_string())));
        assert_eq!(
            rx.recv().await,
            Some(ChannelEvent::Message("reload".to_string()))
        );
        assert_eq!(channel.open_count(), 1);
        assert_eq!(channel.opened_urls()[0].path(), "/websocket");
    }
}
