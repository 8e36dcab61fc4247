//! HTTP client trait abstraction.
//!
//! The viewer only ever issues plain GETs: the liveness probe and the
//! deep-link existence check. Both go through [`HttpClient`] so they can be
//! driven by a mock in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}

/// Transport-level failures. An HTTP status, even 5xx, is not one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Nothing answered on the other end.
    ConnectionFailed(String),
    Timeout(String),
    /// The URL was rejected before a request was sent.
    InvalidUrl(String),
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "timed out: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "request failed: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// # Example
///
/// ```ignore
/// use crashview::traits::{HttpClient, Headers};
///
/// async fn backend_up<C: HttpClient>(client: &C) -> bool {
///     client
///         .get("http://localhost:8080/ok", &Headers::new())
///         .await
///         .map(|r| r.is_success())
///         .unwrap_or(false)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    ///
    /// A non-2xx status is returned as `Ok`; only transport failures are errors.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(304, Bytes::new()).is_success());
        assert!(!Response::new(404, Bytes::new()).is_success());
        assert!(!Response::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_with_headers() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/html".to_string());
        let response = Response::with_headers(200, headers, Bytes::from("<html></html>"));
        assert_eq!(
            response.headers.get("Content-Type"),
            Some(&"text/html".to_string())
        );
        assert_eq!(response.text().unwrap(), "<html></html>");
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "connection failed: refused"
        );
        assert_eq!(
            HttpError::InvalidUrl("::".to_string()).to_string(),
            "invalid URL: ::"
        );
    }
}
