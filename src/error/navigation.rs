//! Navigation errors.
//!
//! Deep-link failures never leave the navigator (they select the fallback
//! entry instead); the variants here describe why a deep link was rejected
//! and the one condition the navigator cannot recover from.

use thiserror::Error;

/// Errors raised while resolving or displaying a navigation target.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavigationError {
    /// The address-bar fragment is empty.
    #[error("no deep link present")]
    EmptyFragment,

    /// The decoded fragment does not resolve to a URL on the viewer origin.
    #[error("deep link '{fragment}' does not resolve on the viewer origin")]
    OffOrigin { fragment: String },

    /// The decoded fragment could not be resolved at all.
    #[error("deep link '{fragment}' is not a valid path: {message}")]
    InvalidPath { fragment: String, message: String },

    /// The existence check for the deep link failed.
    #[error("deep link '{url}' is unavailable: {message}")]
    Unavailable { url: String, message: String },

    /// The host page has no navigation menu entries to fall back to.
    #[error("navigation menu has no entries")]
    EmptyMenu,

    /// A menu entry carries an href that cannot be resolved.
    #[error("menu entry '{name}' has an invalid href '{href}'")]
    InvalidMenuHref { name: String, href: String },

    /// The viewing surface stopped delivering load events.
    #[error("viewing surface closed")]
    SurfaceClosed,
}

impl NavigationError {
    /// Whether the navigator falls back to the default menu entry for this error.
    pub fn falls_back(&self) -> bool {
        matches!(
            self,
            NavigationError::EmptyFragment
                | NavigationError::OffOrigin { .. }
                | NavigationError::InvalidPath { .. }
                | NavigationError::Unavailable { .. }
        )
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NavigationError::EmptyFragment => "E_NAV_EMPTY",
            NavigationError::OffOrigin { .. } => "E_NAV_ORIGIN",
            NavigationError::InvalidPath { .. } => "E_NAV_PATH",
            NavigationError::Unavailable { .. } => "E_NAV_UNAVAILABLE",
            NavigationError::EmptyMenu => "E_NAV_MENU",
            NavigationError::InvalidMenuHref { .. } => "E_NAV_HREF",
            NavigationError::SurfaceClosed => "E_NAV_SURFACE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_link_failures_fall_back() {
        assert!(NavigationError::EmptyFragment.falls_back());
        assert!(NavigationError::Unavailable {
            url: "http://localhost/x".to_string(),
            message: "404".to_string(),
        }
        .falls_back());
        assert!(!NavigationError::EmptyMenu.falls_back());
        assert!(!NavigationError::SurfaceClosed.falls_back());
    }

    #[test]
    fn test_display() {
        let err = NavigationError::OffOrigin {
            fragment: "//evil.example/x".to_string(),
        };
        assert!(err.to_string().contains("//evil.example/x"));
        assert_eq!(err.error_code(), "E_NAV_ORIGIN");
    }
}
