//! Result type alias for viewer operations.

use super::viewer_error::ViewerError;

/// Type alias for Results using ViewerError.
///
/// # Example
///
/// ```ignore
/// use crashview::error::ViewerResult;
///
/// fn load(path: &Path) -> ViewerResult<ReportPayload> {
///     let text = std::fs::read_to_string(path)?;
///     Ok(ReportPayload::from_json(&text)?)
/// }
/// ```
pub type ViewerResult<T> = Result<T, ViewerError>;
