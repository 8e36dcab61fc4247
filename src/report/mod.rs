//! Crash report payload and stack-trace rendering.
//!
//! The backend serves one JSON document per report:
//! `{SysInfo, Build: {Main, Deps}, Stack}`. `Stack` is either a list of
//! goroutine records or the raw text of a Go stack dump.

pub mod dependency;
pub mod render;
pub mod stack;

pub use dependency::{Dependency, DependencyResolver};
pub use render::{
    escape_html, DefaultGoroutineTemplate, GoroutineTemplate, RenderedFrame, RenderedGoroutine,
    StackTraceRenderer, TraceDocument,
};
pub use stack::{parse_goroutine_dump, Goroutine, GoroutineId, ParsedDump, StackFrame};

use std::fmt::Write as _;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ViewerResult;

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Information about the system the reported process ran on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SysInfo {
    pub arch: Option<String>,
    #[serde(rename = "OS")]
    pub os: Option<String>,
    #[serde(default)]
    pub compiler: String,
    pub go_version: Option<String>,
    #[serde(rename = "CPU")]
    pub cpu: Option<u32>,
    pub goroutines: Option<u64>,
    pub threads: Option<u64>,
    #[serde(rename = "MaxCPU")]
    pub max_cpu: Option<u32>,
    /// Bytes obtained from the OS.
    pub mem: Option<u64>,
    /// Cumulative GC pause time in nanoseconds.
    pub gc_pause_ns: Option<u64>,
    pub last_gc_pause: Option<u64>,
    /// Fraction of CPU time spent in the GC.
    #[serde(rename = "GcCPU")]
    pub gc_cpu: Option<f64>,
    /// When the report was written.
    pub time: Option<DateTime<Utc>>,
    pub time_start: Option<DateTime<Utc>>,
    /// Uptime in nanoseconds.
    pub time_running: Option<i64>,
}

impl SysInfo {
    pub fn running(&self) -> Option<Duration> {
        self.time_running.map(Duration::nanoseconds)
    }
}

/// Build metadata embedded in the reported binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub main: Dependency,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deps: Vec<Dependency>,
}

impl BuildInfo {
    pub fn resolver(&self) -> DependencyResolver {
        DependencyResolver::new(self.deps.iter().cloned(), self.main.clone())
    }
}

/// The `Stack` field: structured goroutines or a raw dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StackSource {
    Goroutines(Vec<Goroutine>),
    Dump(String),
}

impl Default for StackSource {
    fn default() -> Self {
        StackSource::Goroutines(Vec::new())
    }
}

impl StackSource {
    /// Goroutines of the report. Only a raw dump can produce failures.
    pub fn parse(&self) -> ParsedDump {
        match self {
            StackSource::Goroutines(goroutines) => ParsedDump {
                goroutines: goroutines.clone(),
                failures: Vec::new(),
            },
            StackSource::Dump(text) => parse_goroutine_dump(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sys_info: SysInfo,
    pub build: BuildInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stack: StackSource,
    /// Why the process crashed, when it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ReportPayload {
    pub fn from_json(text: &str) -> ViewerResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Render the stack traces with the report's own dependency set.
    ///
    /// Goroutine blocks of a raw dump that cannot be parsed are reported in
    /// the document's failures, ahead of template failures.
    pub fn render<T>(&self, template: &T) -> TraceDocument
    where
        T: GoroutineTemplate + ?Sized,
    {
        let parsed = self.stack.parse();
        let renderer = StackTraceRenderer::new(self.build.resolver());
        let mut document = renderer.render(&parsed.goroutines, template);
        document.failures.splice(0..0, parsed.failures);
        document
    }

    /// The stack-trace page: crash reason, system info, compiler,
    /// dependency list and `document`, the result of [`render`](Self::render).
    pub fn to_html(&self, document: &TraceDocument) -> ViewerResult<String> {
        let sys_info = serde_json::to_string(&self.sys_info)?;

        let mut out = String::from("<div class=\"report\">\n<header class=\"report-info\">\n");
        if let Some(reason) = &self.reason {
            let _ = writeln!(out, "<p class=\"reason\">{}</p>", escape_html(reason));
        }
        let _ = writeln!(out, "<pre id=\"sys-info\">{}</pre>", escape_html(&sys_info));
        let _ = writeln!(
            out,
            "<p>Compiler: <span id=\"compiler-info\">{}</span></p>",
            escape_html(&self.sys_info.compiler)
        );

        out.push_str("<ul class=\"dependencies\">\n");
        for dep in self.build.resolver().iter() {
            let class = if dep.is_main { "dependency main" } else { "dependency" };
            let _ = write!(
                out,
                "<li class=\"{}\">{} {}",
                class,
                escape_html(&dep.path),
                escape_html(&dep.version)
            );
            if dep.replace.is_some() {
                let target = dep.effective();
                let _ = write!(
                    out,
                    " =&gt; {} {}",
                    escape_html(&target.path),
                    escape_html(&target.version)
                );
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n</header>\n");

        out.push_str(&document.to_html());
        out.push_str("</div>\n");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "SysInfo": {
            "Arch": "amd64", "OS": "linux", "Compiler": "gc", "GoVersion": "go1.21.4",
            "CPU": 8, "Goroutines": 2, "Threads": 9, "MaxCPU": 8,
            "Time": "2023-11-20T10:15:00+01:00",
            "TimeStart": "2023-11-20T10:00:00+01:00",
            "TimeRunning": 900000000000
        },
        "Build": {
            "Main": {"Path": "example.com/app", "Version": "(devel)"},
            "Deps": [{"Path": "github.com/x/pkg", "Version": "v1.2.3", "Sum": "h1:x="}]
        },
        "Stack": [
            {"ID": 1, "Frames": [
                {"FunctionName": "github.com/x/pkg.Foo", "File": "/src/github.com/x/pkg/file.go", "Line": 42},
                {"FunctionName": "main.main", "File": "/src/example.com/app/main.go", "Line": 7}
            ]}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let payload = ReportPayload::from_json(PAYLOAD).unwrap();
        assert_eq!(payload.sys_info.compiler, "gc");
        assert_eq!(payload.sys_info.os.as_deref(), Some("linux"));
        assert_eq!(payload.sys_info.running(), Some(Duration::minutes(15)));
        assert_eq!(payload.build.deps.len(), 1);
        assert!(payload.reason.is_none());
    }

    #[test]
    fn test_render_payload() {
        let payload = ReportPayload::from_json(PAYLOAD).unwrap();
        let document = payload.render(&DefaultGoroutineTemplate);

        let frames = &document.goroutines[0].frames;
        assert_eq!(frames[0].dependency.as_ref().unwrap().path, "github.com/x/pkg");
        let main = frames[1].dependency.as_ref().unwrap();
        assert_eq!(main.path, "example.com/app");
        assert!(main.is_main);
    }

    #[test]
    fn test_null_fields_and_dump_stack() {
        let payload = ReportPayload::from_json(
            r#"{"SysInfo": null,
                "Build": {"Main": {"Path": "example.com/app"}, "Deps": null},
                "Stack": "goroutine 1 [running]:\nmain.main()\n\t/src/example.com/app/main.go:3 +0x1\n",
                "Reason": "panic: boom"}"#,
        )
        .unwrap();

        assert_eq!(payload.sys_info, SysInfo::default());
        assert!(payload.build.deps.is_empty());
        let parsed = payload.stack.parse();
        assert!(parsed.failures.is_empty());
        assert_eq!(parsed.goroutines[0].frames[0].line, 3);
        assert_eq!(payload.reason.as_deref(), Some("panic: boom"));
    }

    #[test]
    fn test_sys_info_memory_fields() {
        let info: SysInfo = serde_json::from_str(
            r#"{"Compiler": "gc", "Mem": 73400320, "GcPauseNs": 1500000,
                "LastGcPause": 42000, "GcCPU": 0.0125}"#,
        )
        .unwrap();
        assert_eq!(info.mem, Some(73_400_320));
        assert_eq!(info.gc_pause_ns, Some(1_500_000));
        assert_eq!(info.last_gc_pause, Some(42_000));
        assert_eq!(info.gc_cpu, Some(0.0125));
    }

    #[test]
    fn test_page_html_has_report_info() {
        let payload = ReportPayload::from_json(PAYLOAD).unwrap();
        let document = payload.render(&DefaultGoroutineTemplate);
        let html = payload.to_html(&document).unwrap();

        assert!(html.contains("<span id=\"compiler-info\">gc</span>"));
        assert!(html.contains("&quot;GoVersion&quot;:&quot;go1.21.4&quot;"));
        assert!(html.contains("<li class=\"dependency\">github.com/x/pkg v1.2.3</li>"));
        assert!(html.contains("<li class=\"dependency main\">example.com/app (devel)</li>"));
        assert!(html.find("id=\"sys-info\"").unwrap() < html.find("class=\"stacktrace\"").unwrap());
        assert!(!html.contains("class=\"reason\""));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(ReportPayload::from_json("{\"Build\": 3}").is_err());
    }
}
