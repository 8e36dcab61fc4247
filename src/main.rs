use crashview::cli::{describe_error, parse_args, run_cli_command, viewer_error, CliCommand, USAGE};
use crashview::error::ViewerError;
use crashview::startup::ViewerConfig;

use color_eyre::Result;

fn main() -> Result<()> {
    // Handle --version before any initialization
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n", describe_error(&ViewerError::from(e)));
            eprint!("{}", USAGE);
            std::process::exit(2);
        }
    };
    if command == CliCommand::Version {
        crashview::cli::handle_version_command();
    }

    color_eyre::install()?;

    // Logs go to stderr so `render` and `import` output can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ViewerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", describe_error(&ViewerError::from(e)));
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run_cli_command(command, config));
    if let Err(report) = &result {
        if let Some(err) = viewer_error(report) {
            eprintln!("{}", describe_error(err));
        }
    }
    result
}
