//! Unified error type for the viewer.
//!
//! `ViewerError` consolidates the domain-specific error types so callers get
//! one categorization and retry policy across the crate.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::import::ImportError;
use super::navigation::NavigationError;
use super::network::NetworkError;
use super::render::RenderError;

/// Unified error type for the viewer.
#[derive(Debug)]
pub enum ViewerError {
    /// Network-related errors (probe, existence checks, reload channel).
    Network(NetworkError),

    /// Navigation errors the navigator could not recover from.
    Navigation(NavigationError),

    /// Malformed imported report documents.
    Import(ImportError),

    /// Stack-trace rendering errors.
    Render(RenderError),

    /// Configuration errors.
    Config(ConfigError),

    /// Report payload could not be decoded.
    Payload(serde_json::Error),

    /// System/filesystem errors.
    Io(std::io::Error),
}

impl ViewerError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ViewerError::Network(NetworkError::HttpStatus { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            ViewerError::Network(NetworkError::InvalidUrl { .. }) => ErrorCategory::Configuration,
            ViewerError::Network(_) => ErrorCategory::Network,
            ViewerError::Navigation(err) => {
                if err.falls_back() {
                    ErrorCategory::Network
                } else {
                    ErrorCategory::Client
                }
            }
            ViewerError::Import(ImportError::Io(_)) => ErrorCategory::System,
            ViewerError::Import(_) => ErrorCategory::User,
            ViewerError::Render(_) => ErrorCategory::User,
            ViewerError::Config(_) => ErrorCategory::Configuration,
            ViewerError::Payload(_) => ErrorCategory::User,
            ViewerError::Io(_) => ErrorCategory::System,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ViewerError::Network(err) => err.is_retryable(),
            _ => self.category().is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ViewerError::Network(err) => err.user_message(),
            ViewerError::Navigation(err) => format!("Navigation failed: {}", err),
            ViewerError::Import(err) => format!("Could not import report: {}", err),
            ViewerError::Render(err) => format!("Could not render stack trace: {}", err),
            ViewerError::Config(err) => format!("Configuration error: {}", err),
            ViewerError::Payload(err) => format!("Report payload is malformed: {}", err),
            ViewerError::Io(err) => format!("I/O error: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewerError::Network(err) => err.error_code(),
            ViewerError::Navigation(err) => err.error_code(),
            ViewerError::Import(err) => err.error_code(),
            ViewerError::Render(_) => "E_RENDER",
            ViewerError::Config(_) => "E_CONFIG",
            ViewerError::Payload(_) => "E_PAYLOAD",
            ViewerError::Io(_) => "E_IO",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Network(err) => write!(f, "{}", err),
            ViewerError::Navigation(err) => write!(f, "{}", err),
            ViewerError::Import(err) => write!(f, "{}", err),
            ViewerError::Render(err) => write!(f, "{}", err),
            ViewerError::Config(err) => write!(f, "{}", err),
            ViewerError::Payload(err) => write!(f, "invalid report payload: {}", err),
            ViewerError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Network(err) => Some(err),
            ViewerError::Navigation(err) => Some(err),
            ViewerError::Import(err) => Some(err),
            ViewerError::Render(err) => Some(err),
            ViewerError::Config(err) => Some(err),
            ViewerError::Payload(err) => Some(err),
            ViewerError::Io(err) => Some(err),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for ViewerError {
    fn from(err: NetworkError) -> Self {
        ViewerError::Network(err)
    }
}

impl From<NavigationError> for ViewerError {
    fn from(err: NavigationError) -> Self {
        ViewerError::Navigation(err)
    }
}

impl From<ImportError> for ViewerError {
    fn from(err: ImportError) -> Self {
        ViewerError::Import(err)
    }
}

impl From<RenderError> for ViewerError {
    fn from(err: RenderError) -> Self {
        ViewerError::Render(err)
    }
}

impl From<ConfigError> for ViewerError {
    fn from(err: ConfigError) -> Self {
        ViewerError::Config(err)
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::Io(err)
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::Payload(err)
    }
}
