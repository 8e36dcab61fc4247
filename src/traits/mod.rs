//! Trait abstractions for the viewer's external collaborators.
//!
//! - [`HttpClient`] - GET requests (liveness probe, deep-link existence check)
//! - [`ReloadChannelConnector`] - live-reload push channel
//! - [`PageHost`] - address bar, title, menu and full reload
//! - [`ViewingSurface`] - embedded surface sub-documents load into

pub mod host;
pub mod http;
pub mod reload_channel;

pub use host::{PageHost, SurfaceLoad, ViewingSurface};
pub use http::{Headers, HttpClient, HttpError, Response};
pub use reload_channel::{ChannelEvent, ReloadChannelConnector};
