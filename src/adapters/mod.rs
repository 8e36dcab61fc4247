//! Concrete implementations of trait abstractions.
//!
//! This module provides production-ready adapters that implement the traits
//! defined in `crate::traits`, plus the console host used by the CLI.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TungsteniteReloadChannel`] - live-reload channel using tokio-tungstenite
//! - [`ConsoleHost`] / [`ConsoleSurface`] - headless host that logs navigations
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all traits:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockReloadChannel`] - Scripted live-reload sessions
//! - [`mock::MockPageHost`] and [`mock::MockSurface`] - in-memory page

pub mod console;
pub mod mock;
pub mod reqwest_http;
pub mod tungstenite_reload;

pub use console::{ConsoleHost, ConsoleSurface};
pub use mock::{MockHttpClient, MockPageHost, MockReloadChannel, MockSurface};
pub use reqwest_http::ReqwestHttpClient;
pub use tungstenite_reload::TungsteniteReloadChannel;
