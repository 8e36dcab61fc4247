//! Mock implementations for testing.
//!
//! This module provides mock implementations of all trait abstractions,
//! enabling unit testing without a running backend or a browser.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable and scripted responses
//! - [`MockReloadChannel`] - live-reload channel with scripted sessions
//! - [`MockPageHost`] - in-memory address bar, title and menu
//! - [`MockSurface`] - viewing surface with injectable loads

pub mod host;
pub mod http;
pub mod reload_channel;

pub use host::{MockPageHost, MockSurface, MockSurfaceHandle};
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use reload_channel::MockReloadChannel;
