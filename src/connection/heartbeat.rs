//! Backend liveness probe.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::error::NetworkError;
use crate::traits::{Headers, HttpClient};

/// Default delay between failed probes.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

/// Result of a single probe.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    Online,
    Offline(NetworkError),
}

impl ProbeOutcome {
    pub fn is_online(&self) -> bool {
        matches!(self, ProbeOutcome::Online)
    }
}

/// Polls the backend's liveness endpoint.
pub struct HeartbeatProbe<C: HttpClient> {
    http: Arc<C>,
    url: Url,
    interval: Duration,
}

impl<C: HttpClient> HeartbeatProbe<C> {
    /// Probe `{origin}{path}` once per [`DEFAULT_HEARTBEAT_INTERVAL`].
    pub fn new(http: Arc<C>, origin: &Url, path: &str) -> Result<Self, NetworkError> {
        let url = origin.join(path).map_err(|e| NetworkError::InvalidUrl {
            url: format!("{}{}", origin, path),
            message: e.to_string(),
        })?;
        Ok(Self {
            http,
            url,
            interval: DEFAULT_HEARTBEAT_INTERVAL,
        })
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Issue one probe. Any 2xx answer means the backend is up.
    pub async fn probe(&self) -> ProbeOutcome {
        match self.http.get(self.url.as_str(), &Headers::new()).await {
            Ok(response) if response.is_success() => ProbeOutcome::Online,
            Ok(response) => ProbeOutcome::Offline(NetworkError::HttpStatus {
                status: response.status,
                message: "liveness check rejected".to_string(),
            }),
            Err(e) => ProbeOutcome::Offline(NetworkError::from(e)),
        }
    }

    /// Probe until the backend answers. Returns the number of probes issued.
    ///
    /// There is no retry cap: a backend that never comes back keeps this
    /// future pending forever. A failure that will not clear by itself,
    /// such as a missing liveness endpoint, is reported once at warn level.
    pub async fn await_online(&self) -> u32 {
        let mut attempts = 0u32;
        let mut warned = false;
        loop {
            attempts = attempts.saturating_add(1);
            match self.probe().await {
                ProbeOutcome::Online => {
                    debug!("Backend online after {} probe(s)", attempts);
                    return attempts;
                }
                ProbeOutcome::Offline(e) if !e.is_retryable() && !warned => {
                    warned = true;
                    warn!("Heartbeat {} failed ({}): {}", self.url, e.error_code(), e.user_message());
                }
                ProbeOutcome::Offline(e) => {
                    debug!("Heartbeat {} failed ({}): {}", self.url, e.error_code(), e);
                }
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
