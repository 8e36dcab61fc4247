//! Startup configuration.
//!
//! # Usage
//!
//! ```ignore
//! use crashview::startup::ViewerConfig;
//!
//! let config = ViewerConfig::from_env()?;
//! ```

pub mod config;

pub use config::{parse_origin, ViewerConfig, DEFAULT_ORIGIN};
