//! Backend connection monitoring.
//!
//! [`HeartbeatProbe`] polls the liveness endpoint, [`MonitorState`] holds the
//! reconnect rules and [`ConnectionMonitor`] drives both together with the
//! live-reload channel.

pub mod heartbeat;
pub mod monitor;
pub mod state;

pub use heartbeat::{HeartbeatProbe, ProbeOutcome, DEFAULT_HEARTBEAT_INTERVAL};
pub use monitor::{ConnectionMonitor, MonitorEvent, MonitorExit, MonitorHandle, ReloadReason};
pub use state::{ChannelDecision, ConnectionState, MonitorState, ProbeDecision};

use url::Url;

use crate::error::NetworkError;

/// WebSocket URL of the live-reload endpoint for an HTTP origin.
///
/// `http` origins map to `ws`, `https` origins to `wss`.
pub fn reload_channel_url(origin: &Url, path: &str) -> Result<Url, NetworkError> {
    let invalid = |message: String| NetworkError::InvalidUrl {
        url: origin.to_string(),
        message,
    };

    let scheme = match origin.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    };

    let mut url = origin.join(path).map_err(|e| invalid(e.to_string()))?;
    url.set_scheme(scheme)
        .map_err(|_| invalid(format!("cannot switch to '{}'", scheme)))?;
    Ok(url)
}
