//! Network-related error types.
//!
//! Covers the liveness probe, deep-link existence checks and the live-reload
//! channel. Almost all of these are expected while the backend restarts.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Connection to the backend failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// A URL could not be built or parsed.
    InvalidUrl { url: String, message: String },

    /// The live-reload channel failed or was dropped.
    ChannelFailed { url: String, message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::ChannelFailed { .. } => true,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { url, .. } => {
                format!("Unable to reach the backend at {}. It may be restarting.", url)
            }
            NetworkError::Timeout { operation } => {
                format!("The {} request timed out.", operation)
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                404 => "The requested report page was not found.".to_string(),
                500..=599 => "The backend is experiencing issues.".to_string(),
                _ => format!("The backend returned HTTP {}.", status),
            },
            NetworkError::InvalidUrl { url, .. } => format!("'{}' is not a valid URL.", url),
            NetworkError::ChannelFailed { .. } => {
                "Lost the live-reload connection to the backend.".to_string()
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::ChannelFailed { .. } => "E_NET_CHANNEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidUrl { url, message } => {
                write!(f, "Invalid URL '{}': {}", url, message)
            }
            NetworkError::ChannelFailed { url, message } => {
                write!(f, "Live-reload channel to '{}' failed: {}", url, message)
            }
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<HttpError> for NetworkError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: "unknown".to_string(),
                message,
            },
            HttpError::Timeout(operation) => NetworkError::Timeout { operation },
            HttpError::InvalidUrl(url) => NetworkError::InvalidUrl {
                url,
                message: "rejected by HTTP client".to_string(),
            },
            HttpError::Other(message) => NetworkError::Other { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_is_retryable() {
        let err = NetworkError::ConnectionFailed {
            url: "http://localhost:8080/ok".to_string(),
            message: "Connection refused".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_NET_CONN");
        assert!(err.user_message().contains("restarting"));
    }

    #[test]
    fn test_http_status_retryable_for_server_errors() {
        let err_503 = NetworkError::HttpStatus {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert!(err_503.is_retryable());

        let err_404 = NetworkError::HttpStatus {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(!err_404.is_retryable());
        assert!(err_404.user_message().contains("not found"));
    }

    #[test]
    fn test_invalid_url_not_retryable() {
        let err = NetworkError::InvalidUrl {
            url: "::".to_string(),
            message: "relative URL without a base".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_NET_URL");
    }

    #[test]
    fn test_from_http_error() {
        let err: NetworkError = HttpError::Timeout("GET /ok".to_string()).into();
        assert!(matches!(err, NetworkError::Timeout { ref operation } if operation == "GET /ok"));

        let err: NetworkError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_display_format() {
        let err = NetworkError::ChannelFailed {
            url: "ws://localhost:8080/websocket".to_string(),
            message: "reset".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("/websocket"));
        assert!(display.contains("reset"));
    }
}
