//! Stack-trace rendering.
//!
//! Expands goroutines into labelled frames, attaching the dependency that
//! owns each frame's source file.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{trace, warn};

use super::dependency::{Dependency, DependencyResolver};
use super::stack::{Goroutine, GoroutineId, StackFrame};
use crate::error::RenderError;

/// A frame ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    pub package_name: String,
    pub short_file: String,
    pub line: u32,
    pub function_short_name: String,
    /// Module the frame's source belongs to, when it could be resolved.
    pub dependency: Option<Arc<Dependency>>,
}

impl RenderedFrame {
    /// `<package> <shortFile>:<line> <shortFunction>`
    pub fn label(&self) -> String {
        format!(
            "{} {}:{} {}",
            self.package_name, self.short_file, self.line, self.function_short_name
        )
    }
}

/// Renders the container of one goroutine. Frames are appended after it.
pub trait GoroutineTemplate {
    fn render(&self, goroutine: &Goroutine) -> Result<String, RenderError>;
}

impl<F> GoroutineTemplate for F
where
    F: Fn(&Goroutine) -> Result<String, RenderError>,
{
    fn render(&self, goroutine: &Goroutine) -> Result<String, RenderError> {
        self(goroutine)
    }
}

/// Heading of the form `goroutine <id> [<state>]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGoroutineTemplate;

impl GoroutineTemplate for DefaultGoroutineTemplate {
    fn render(&self, goroutine: &Goroutine) -> Result<String, RenderError> {
        let mut heading = format!("goroutine {}", goroutine.id);
        if let Some(state) = &goroutine.state {
            let _ = write!(heading, " [{}]", state);
        }
        Ok(format!(
            "<h3 class=\"goroutine-header\">{}</h3>",
            escape_html(&heading)
        ))
    }
}

#[derive(Debug, Clone)]
pub struct RenderedGoroutine {
    pub id: GoroutineId,
    /// Markup produced by the template.
    pub container: String,
    pub frames: Vec<RenderedFrame>,
}

/// Output of a render pass. Goroutines whose template failed are missing
/// from `goroutines` and listed in `failures`.
#[derive(Debug, Clone, Default)]
pub struct TraceDocument {
    pub goroutines: Vec<RenderedGoroutine>,
    pub failures: Vec<RenderError>,
}

impl TraceDocument {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<div class=\"stacktrace\">\n");
        for goroutine in &self.goroutines {
            let _ = writeln!(
                out,
                "<section class=\"goroutine\" data-id=\"{}\">",
                escape_html(&goroutine.id.to_string())
            );
            out.push_str(&goroutine.container);
            out.push_str("\n<ol class=\"frames\">\n");
            for frame in &goroutine.frames {
                out.push_str("<li class=\"frame\">");
                out.push_str(&escape_html(&frame.label()));
                if let Some(dep) = &frame.dependency {
                    let _ = write!(
                        out,
                        " <span class=\"dependency\" title=\"{}\">{} {}</span>",
                        escape_html(&dep.path),
                        escape_html(&dep.path),
                        escape_html(&dep.version)
                    );
                }
                out.push_str("</li>\n");
            }
            out.push_str("</ol>\n</section>\n");
        }
        out.push_str("</div>\n");
        out
    }
}

pub struct StackTraceRenderer {
    resolver: DependencyResolver,
}

impl StackTraceRenderer {
    pub fn new(resolver: DependencyResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &DependencyResolver {
        &self.resolver
    }

    /// Render every goroutine, in order. A template failure only drops the
    /// goroutine it happened on.
    pub fn render<T>(&self, goroutines: &[Goroutine], template: &T) -> TraceDocument
    where
        T: GoroutineTemplate + ?Sized,
    {
        let mut document = TraceDocument::default();
        for goroutine in goroutines {
            match template.render(goroutine) {
                Ok(container) => document.goroutines.push(RenderedGoroutine {
                    id: goroutine.id.clone(),
                    container,
                    frames: goroutine
                        .frames
                        .iter()
                        .map(|frame| self.render_frame(frame))
                        .collect(),
                }),
                Err(e) => {
                    warn!("Skipping goroutine {}: {}", goroutine.id, e);
                    document.failures.push(e);
                }
            }
        }
        document
    }

    pub fn render_frame(&self, frame: &StackFrame) -> RenderedFrame {
        let function_short_name = last_segment(&frame.function_name).to_string();
        let package_name = function_short_name
            .split('.')
            .next()
            .unwrap_or_default()
            .to_string();

        RenderedFrame {
            package_name,
            short_file: last_segment(&frame.file).to_string(),
            line: frame.line,
            function_short_name,
            dependency: self.resolve_file(&frame.file),
        }
    }

    /// Walk from `file` up to the root and return the first directory a
    /// dependency claims.
    pub fn resolve_file(&self, file: &str) -> Option<Arc<Dependency>> {
        let mut probe = file.trim_end_matches('/');
        while !probe.is_empty() {
            if let Some(dep) = self.resolver.find(&strip_versions(probe)) {
                trace!("{} belongs to {} {}", file, dep.path, dep.version);
                return Some(Arc::clone(dep));
            }
            match probe.rfind('/') {
                Some(idx) => probe = &probe[..idx],
                None => break,
            }
        }
        None
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Drop module-cache version suffixes: `pkg@v1.2.3` becomes `pkg`.
fn strip_versions(path: &str) -> Cow<'_, str> {
    if !path.contains('@') {
        return Cow::Borrowed(path);
    }
    let stripped: Vec<&str> = path
        .split('/')
        .map(|segment| segment.split('@').next().unwrap_or(segment))
        .collect();
    Cow::Owned(stripped.join("/"))
}

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
