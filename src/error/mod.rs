//! Unified error handling for the viewer.
//!
//! - **Error Categories**: classification driving retry vs. surface decisions
//! - **Domain-specific Errors**: network, navigation, import, render, config
//! - **Unified Error Type**: `ViewerError` consolidates all error types
//! - **Result Type Alias**: `ViewerResult<T>`
//!
//! | Category | Typical source | Retryable |
//! |----------|----------------|-----------|
//! | Network | backend restarting, stale deep link | Yes |
//! | Server | backend 5xx | Yes |
//! | Client | host without a menu | No |
//! | User | malformed report document or payload | No |
//! | System | report file unreadable | No |
//! | Configuration | bad `CRASHVIEW_*` value | No |

mod category;
mod config;
mod import;
mod navigation;
mod network;
mod render;
mod result;
mod viewer_error;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use import::ImportError;
pub use navigation::NavigationError;
pub use network::NetworkError;
pub use render::RenderError;
pub use result::ViewerResult;
pub use viewer_error::ViewerError;
