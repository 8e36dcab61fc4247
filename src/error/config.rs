//! Configuration errors.

use thiserror::Error;

/// Errors raised while building a [`crate::startup::ViewerConfig`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// The origin is not an absolute http(s) URL.
    #[error("invalid origin '{value}': {message}")]
    InvalidOrigin { value: String, message: String },

    /// An environment variable holds a value of the wrong shape.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    /// A required command-line argument is missing.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// A command-line option the CLI does not know.
    #[error("unknown option '{0}'")]
    UnknownFlag(String),
}
