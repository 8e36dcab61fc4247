//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from `crashview::adapters::mock`
//! and provides additional test-specific mock configurations.

pub use crashview::adapters::mock::{
    MockHttpClient, MockPageHost, MockReloadChannel, MockResponse, MockSurface,
    MockSurfaceHandle,
};
pub use crashview::traits::{ChannelEvent, Headers, HttpClient, Response};

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Backend that answers the liveness probe after `failures` refused probes.
    pub fn with_backend_after(self, failures: usize) -> Self {
        let url = format!("{}ok", super::ORIGIN);
        self.client
            .push_responses(&url, vec![MockResponse::refused(); failures]);
        self.client.set_response(&url, MockResponse::ok());
        self
    }

    /// Configures a page that exists.
    pub fn with_page(self, path: &str) -> Self {
        let url = format!("{}{}", super::ORIGIN, path.trim_start_matches('/'));
        self.client.set_response(&url, MockResponse::ok());
        self
    }

    /// Everything not configured answers 404.
    #[allow(dead_code)]
    pub fn with_not_found_default(self) -> Self {
        self.client.set_default_response(MockResponse::status(404));
        self
    }

    /// Builds the configured mock client.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
