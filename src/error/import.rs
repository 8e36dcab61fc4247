//! Errors for importing externally supplied report documents.

use thiserror::Error;

/// Errors raised by the content importer.
///
/// Every variant is fatal: a malformed report document has no sensible
/// fallback view.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The required content region is absent from the foreign document.
    #[error("unable to find content region '{selector}'")]
    MissingContent { selector: String },

    /// The selector string is not one of `#id`, `.class` or a tag name.
    #[error("unsupported content selector '{selector}'")]
    InvalidSelector { selector: String },

    /// The document is missing a structural element such as `<head>`.
    #[error("document has no <{element}> element")]
    MissingElement { element: &'static str },

    /// The imported-report payload could not be decoded.
    #[error("invalid imported report payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Reading or serializing the document failed.
    #[error("document I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ImportError::MissingContent { .. } => "E_IMPORT_CONTENT",
            ImportError::InvalidSelector { .. } => "E_IMPORT_SELECTOR",
            ImportError::MissingElement { .. } => "E_IMPORT_STRUCTURE",
            ImportError::Payload(_) => "E_IMPORT_PAYLOAD",
            ImportError::Io(_) => "E_IMPORT_IO",
        }
    }
}
