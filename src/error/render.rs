//! Errors for stack-trace rendering.

use thiserror::Error;

/// Errors raised while rendering a single goroutine.
///
/// The renderer isolates these per goroutine; they are collected rather
/// than propagated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RenderError {
    /// The goroutine template rejected its input.
    #[error("template failed for goroutine {goroutine}: {message}")]
    Template { goroutine: String, message: String },

    /// A raw stack dump could not be parsed.
    #[error("malformed stack dump at line {line}: {message}")]
    MalformedDump { line: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_display() {
        let err = RenderError::Template {
            goroutine: "17".to_string(),
            message: "missing container".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "template failed for goroutine 17: missing container"
        );
    }
}
