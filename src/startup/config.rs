//! Viewer configuration.

use std::time::Duration;

use url::Url;

use crate::connection::DEFAULT_HEARTBEAT_INTERVAL;
use crate::error::ConfigError;
use crate::import::Selector;
use crate::navigation::DEFAULT_FALLBACK_CLASSES;

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Configuration for a viewer session.
///
/// Use the builder pattern to customize it, or [`ViewerConfig::from_env`]
/// to read the `CRASHVIEW_*` variables.
///
/// # Example
///
/// ```ignore
/// use crashview::startup::ViewerConfig;
/// use std::time::Duration;
///
/// let config = ViewerConfig::default()
///     .with_origin("http://localhost:9000")?
///     .with_heartbeat_interval(Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Backend origin (default: http://localhost:8080)
    pub origin: Url,
    /// Delay between failed liveness probes (default: 1s)
    pub heartbeat_interval: Duration,
    /// Liveness endpoint path (default: /ok)
    pub heartbeat_path: String,
    /// Live-reload endpoint path (default: /websocket)
    pub reload_path: String,
    /// Default menu entry classes, highest priority first
    pub fallback_classes: Vec<String>,
    /// Content region of imported reports (default: #content)
    pub content_selector: Selector,
    /// Open the origin in the system browser on start
    pub open_browser: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            heartbeat_path: "/ok".to_string(),
            reload_path: "/websocket".to_string(),
            fallback_classes: DEFAULT_FALLBACK_CLASSES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            content_selector: Selector::Id("content".to_string()),
            open_browser: false,
        }
    }
}

fn default_origin() -> Url {
    match Url::parse(DEFAULT_ORIGIN) {
        Ok(url) => url,
        Err(_) => unreachable!("default origin is a valid URL"),
    }
}

/// Parse an origin, accepting only absolute http(s) URLs with a host.
pub fn parse_origin(value: &str) -> Result<Url, ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidOrigin {
        value: value.to_string(),
        message: message.to_string(),
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(url)
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

impl ViewerConfig {
    /// Create a new ViewerConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend origin.
    pub fn with_origin(mut self, origin: &str) -> Result<Self, ConfigError> {
        self.origin = parse_origin(origin)?;
        Ok(self)
    }

    /// Set the heartbeat interval.
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Set the default menu entry classes.
    pub fn with_fallback_classes(mut self, classes: Vec<String>) -> Self {
        self.fallback_classes = classes;
        self
    }

    /// Set the content region selector for imports.
    pub fn with_content_selector(mut self, selector: Selector) -> Self {
        self.content_selector = selector;
        self
    }

    /// Set whether to open the system browser.
    pub fn with_open_browser(mut self, open: bool) -> Self {
        self.open_browser = open;
        self
    }

    /// Create config from the process environment.
    ///
    /// Reads `CRASHVIEW_ORIGIN`, `CRASHVIEW_HEARTBEAT_MS` and `CRASHVIEW_OPEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(origin) = lookup("CRASHVIEW_ORIGIN") {
            config = config.with_origin(&origin)?;
        }

        if let Some(ms) = lookup("CRASHVIEW_HEARTBEAT_MS") {
            let millis = ms
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "CRASHVIEW_HEARTBEAT_MS",
                    value: ms.clone(),
                })?;
            config.heartbeat_interval = Duration::from_millis(millis);
        }

        if let Some(open) = lookup("CRASHVIEW_OPEN") {
            config.open_browser = parse_flag("CRASHVIEW_OPEN", &open)?;
        }

        Ok(config)
    }
}
