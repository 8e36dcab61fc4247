//! Command-line argument parsing for the crashview CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Follow a live backend (default)
    Watch {
        /// Backend origin, optionally with a `#fragment` deep link
        origin: Option<String>,
        /// Open the origin in the system browser
        open: bool,
    },
    /// Render a report payload's stack traces as HTML
    Render { payload: PathBuf },
    /// Import an exported report document into a blank page
    Import { report: PathBuf },
}

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: crashview [COMMAND] [OPTIONS]

Commands:
  watch [ORIGIN]          Follow a running backend (default)
  render <payload.json>   Render the stack traces of a report payload as HTML
  import <report.json>    Import an exported report document

Options:
  --open                  Open the backend in the system browser
  -V, --version           Print version
  -h, --help              Print this help

Environment:
  CRASHVIEW_ORIGIN        Backend origin (default http://localhost:8080)
  CRASHVIEW_HEARTBEAT_MS  Delay between liveness probes in milliseconds
  CRASHVIEW_OPEN          Open the browser on start (1/0)
  RUST_LOG                Log filter (default info)
";

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use crashview::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["crashview".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut positional = Vec::new();
    let mut open = false;

    // Skip the program name
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--open" => open = true,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ConfigError::UnknownFlag(arg));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    match positional.next().as_deref() {
        None | Some("watch") => Ok(CliCommand::Watch {
            origin: positional.next(),
            open,
        }),
        Some("render") => positional
            .next()
            .map(|p| CliCommand::Render {
                payload: PathBuf::from(p),
            })
            .ok_or(ConfigError::MissingArgument("render <payload.json>")),
        Some("import") => positional
            .next()
            .map(|p| CliCommand::Import {
                report: PathBuf::from(p),
            })
            .ok_or(ConfigError::MissingArgument("import <report.json>")),
        // A bare origin is shorthand for `watch ORIGIN`.
        Some(other) => Ok(CliCommand::Watch {
            origin: Some(other.to_string()),
            open,
        }),
    }
}
