//! CLI module for crashview.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - The `watch`, `render` and `import` commands
//!
//! # Usage
//!
//! ```ignore
//! use crashview::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command, ViewerConfig::from_env()?).await?;
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use commands::{
    default_menu, handle_import_command, handle_render_command, handle_watch_command,
    import_report_page, render_report_page,
};
pub use version::{handle_version_command, version_string, VERSION};

use color_eyre::eyre::Report;
use color_eyre::Result;

use crate::error::ViewerError;
use crate::startup::ViewerConfig;

/// Run a parsed CLI command.
///
/// # Note
///
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub async fn run_cli_command(command: CliCommand, config: ViewerConfig) -> Result<()> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            print!("{}", USAGE);
            Ok(())
        }
        CliCommand::Watch { origin, open } => handle_watch_command(origin, open, config).await,
        CliCommand::Render { payload } => handle_render_command(&payload),
        CliCommand::Import { report } => handle_import_command(&report, &config),
    }
}

/// The viewer error behind a failed command, if there is one.
pub fn viewer_error(report: &Report) -> Option<&ViewerError> {
    report
        .chain()
        .find_map(|cause| cause.downcast_ref::<ViewerError>())
}

/// Message printed to stderr when a command fails.
pub fn describe_error(err: &ViewerError) -> String {
    let mut text = format!("error: {}\n  hint: {}", err.user_message(), err.recovery_hint());
    if err.is_retryable() {
        text.push_str("\n  the failure looks transient, running the command again may succeed");
    }
    text
}
