//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use crashview::prelude::*;
//! ```

// Connection monitoring
pub use crate::connection::{
    ConnectionMonitor, ConnectionState, HeartbeatProbe, MonitorEvent, MonitorExit, MonitorState,
};

// Navigation
pub use crate::navigation::{FrameNavigator, Menu, MenuEntry, NavigationTarget, Provenance};

// Reports
pub use crate::report::{
    DefaultGoroutineTemplate, Dependency, DependencyResolver, Goroutine, GoroutineTemplate,
    ReportPayload, StackFrame, StackTraceRenderer, TraceDocument,
};

// Import
pub use crate::import::{ContentImporter, HostDocument, ImportedReport, Selector};

// Errors and configuration
pub use crate::error::{ErrorCategory, ViewerError, ViewerResult};
pub use crate::startup::ViewerConfig;

// Orchestration
pub use crate::viewer::{Viewer, ViewerExit};
