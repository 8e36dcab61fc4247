//! crashview - viewer core for Go crash reports
//!
//! Keeps a report page alive across backend restarts, follows deep links
//! into report sections and renders goroutine stack traces against the
//! report's dependency set.
//!
//! This library exposes modules for use in integration tests and the CLI.

pub mod adapters;
pub mod cli;
pub mod connection;
pub mod error;
pub mod import;
pub mod navigation;
pub mod prelude;
pub mod report;
pub mod startup;
pub mod traits;
pub mod viewer;
