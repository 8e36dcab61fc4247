//! Handlers for the crashview subcommands.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tracing::{info, warn};

use crate::adapters::{ConsoleHost, ConsoleSurface, ReqwestHttpClient, TungsteniteReloadChannel};
use crate::error::{ViewerError, ViewerResult};
use crate::import::{ContentImporter, HostDocument, ImportedReport};
use crate::navigation::{Menu, MenuEntry};
use crate::report::{DefaultGoroutineTemplate, ReportPayload};
use crate::startup::{parse_origin, ViewerConfig};
use crate::traits::PageHost;
use crate::viewer::{Viewer, ViewerExit};

/// Upper bound for a single probe or page check.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Report archive files the backend serves a page for.
const REPORT_FILES: [&str; 7] = [
    "allocs.prof",
    "block.prof",
    "goroutine.prof",
    "heap.prof",
    "mutex.prof",
    "threadcreate.prof",
    "stack",
];

/// Menu of a backend serving a full crash report.
pub fn default_menu() -> Menu {
    let mut menu = Menu::new(vec![
        MenuEntry::new("Info", "/info").with_class("Info"),
        MenuEntry::new("Stack trace", "/stacktrace").with_class("stacktrace"),
    ]);
    for entry in Menu::from_report_files(REPORT_FILES).entries() {
        menu.push(entry.clone());
    }
    menu
}

/// Render the stack-trace page of a payload file to stdout.
pub fn handle_render_command(payload: &Path) -> Result<()> {
    let text = std::fs::read_to_string(payload)
        .map_err(ViewerError::from)
        .wrap_err_with(|| format!("reading {}", payload.display()))?;
    print!("{}", render_report_page(&text)?);
    Ok(())
}

/// System info, dependencies and stack traces of a JSON payload as HTML.
pub fn render_report_page(payload_json: &str) -> ViewerResult<String> {
    let report = ReportPayload::from_json(payload_json)?;
    let document = report.render(&DefaultGoroutineTemplate);
    for failure in &document.failures {
        warn!("{}", failure);
    }
    report.to_html(&document)
}

/// Import an exported report into a blank page and print the result.
pub fn handle_import_command(report: &Path, config: &ViewerConfig) -> Result<()> {
    let text = std::fs::read_to_string(report)
        .map_err(ViewerError::from)
        .wrap_err_with(|| format!("reading {}", report.display()))?;
    println!("{}", import_report_page(&text, config)?);
    Ok(())
}

/// Import an exported report document into a blank page and serialize it.
pub fn import_report_page(report_json: &str, config: &ViewerConfig) -> ViewerResult<String> {
    let imported = ImportedReport::from_json(report_json)?;

    let mut host = HostDocument::blank()?;
    let importer = ContentImporter::new(config.content_selector.clone());
    let summary = imported.import_into(&importer, &mut host)?;
    info!(
        "Imported report with {} meta tag(s) and {} link(s)",
        summary.moved_meta.len(),
        summary.retargeted_links
    );
    Ok(host.to_html()?)
}

/// Follow a live backend until interrupted.
///
/// A reload requested by the backend starts a fresh viewer session with
/// the current deep link, the way a browser keeps the fragment on reload.
pub async fn handle_watch_command(
    origin: Option<String>,
    open: bool,
    config: ViewerConfig,
) -> Result<()> {
    let mut config = config;
    let mut fragment = String::new();
    if let Some(origin) = origin {
        let mut url = parse_origin(&origin).map_err(ViewerError::from)?;
        fragment = url.fragment().unwrap_or_default().to_string();
        url.set_fragment(None);
        config.origin = url;
    }
    config.open_browser |= open;

    if config.open_browser {
        if let Err(e) = webbrowser::open(config.origin.as_str()) {
            warn!("Could not open browser: {}", e);
        }
    }

    let http = Arc::new(ReqwestHttpClient::with_timeout(REQUEST_TIMEOUT));
    let connector = Arc::new(TungsteniteReloadChannel::new());
    info!("Watching {}", config.origin);

    loop {
        let host = Arc::new(ConsoleHost::new(config.origin.clone(), &fragment, default_menu()));
        let surface = ConsoleSurface::new(Arc::clone(&http));
        let viewer = Viewer::new(
            &config,
            Arc::clone(&http),
            Arc::clone(&connector),
            Arc::clone(&host),
            surface,
        )?;

        let exit = tokio::select! {
            exit = viewer.run() => exit?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                return Ok(());
            }
        };

        match exit {
            ViewerExit::Reloaded(_) if host.take_reload() => {
                fragment = host.fragment();
            }
            ViewerExit::Reloaded(reason) => {
                return Err(eyre!("viewer reloaded ({:?}) without a host reload", reason));
            }
            ViewerExit::SurfaceClosed => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_menu_prefers_stacktrace() {
        let menu = default_menu();
        let entry = menu.element_or_default(&["stacktrace", "Info"]).unwrap();
        assert_eq!(entry.href, "/stacktrace");
        assert_eq!(menu.entries().len(), 9);
    }

    #[test]
    fn test_render_report_page() {
        let html = render_report_page(
            r#"{"SysInfo": {"Compiler": "gccgo", "Mem": 1024},
                "Build": {"Main": {"Path": "example.com/app", "Version": "v0.1.0"}},
                "Stack": [{"ID": 1, "Frames": [
                    {"FunctionName": "main.main", "File": "/src/example.com/app/main.go", "Line": 7}
                ]}],
                "Reason": "panic: <nil> map"}"#,
        )
        .unwrap();

        assert!(html.contains("<span id=\"compiler-info\">gccgo</span>"));
        assert!(html.contains("&quot;Mem&quot;:1024"));
        assert!(html.contains("<p class=\"reason\">panic: &lt;nil&gt; map</p>"));
        assert!(html.contains("main main.go:7 main.main"));
    }

    #[test]
    fn test_render_command_missing_file() {
        assert!(handle_render_command(Path::new("/nonexistent/report.json")).is_err());
    }

    #[test]
    fn test_import_missing_content_is_import_error() {
        let err = import_report_page(r#"{"data": "<p>no region</p>"}"#, &ViewerConfig::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "E_IMPORT_CONTENT");
    }

    #[test]
    fn test_import_command() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"data": "<div id=\"content\"><a href=\"/x\">x</a></div>"}}"#
        )
        .unwrap();

        assert!(handle_import_command(file.path(), &ViewerConfig::default()).is_ok());
    }
}
