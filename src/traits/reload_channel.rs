//! Live-reload channel trait abstraction.
//!
//! Models the browser-style push channel the backend uses to announce fresh
//! data: opening never fails synchronously, and every outcome (including a
//! failed handshake) arrives as an event.

use tokio::sync::mpsc;
use url::Url;

/// Events delivered by a live-reload channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The channel finished its handshake.
    Opened,
    /// The backend pushed a message. The payload is never interpreted.
    Message(String),
    /// The channel closed or could not be opened. No events follow.
    Closed,
}

/// Trait for opening live-reload channels.
///
/// # Example
///
/// ```ignore
/// use crashview::traits::{ChannelEvent, ReloadChannelConnector};
///
/// let mut events = connector.open(&url);
/// while let Some(event) = events.recv().await {
///     if event == ChannelEvent::Closed {
///         break;
///     }
/// }
/// ```
pub trait ReloadChannelConnector: Send + Sync {
    /// Open a channel to `url`.
    ///
    /// Events are delivered in arrival order on the returned receiver. The
    /// sequence always ends with [`ChannelEvent::Closed`].
    fn open(&self, url: &Url) -> mpsc::Receiver<ChannelEvent>;
}
