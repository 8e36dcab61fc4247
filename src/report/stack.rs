//! Goroutines and stack frames.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RenderError;

/// Goroutine identifier. Producers emit either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoroutineId {
    Number(u64),
    Text(String),
}

impl fmt::Display for GoroutineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoroutineId::Number(n) => write!(f, "{}", n),
            GoroutineId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for GoroutineId {
    fn from(n: u64) -> Self {
        GoroutineId::Number(n)
    }
}

/// One call frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackFrame {
    /// Fully qualified function, e.g. `github.com/x/pkg.(*T).Run`.
    pub function_name: String,
    /// Absolute source path.
    pub file: String,
    pub line: u32,
}

impl StackFrame {
    pub fn new(function_name: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function_name: function_name.into(),
            file: file.into(),
            line,
        }
    }
}

/// A goroutine and its frames, innermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Goroutine {
    #[serde(rename = "ID")]
    pub id: GoroutineId,
    /// Scheduler state from the dump header, e.g. `running` or `chan receive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub frames: Vec<StackFrame>,
}

impl Goroutine {
    pub fn new(id: impl Into<GoroutineId>, frames: Vec<StackFrame>) -> Self {
        Self {
            id: id.into(),
            state: None,
            frames,
        }
    }
}

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    // GOTRACEBACK=system and above add `gp=.. m=.. mp=..` before the state.
    Regex::new(r"^goroutine (\d+)(?: [^\[]*)? \[([^\]]*)\]:$")
        .expect("Invalid goroutine header regex")
});

static CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:created by )?(.+?)(?:\([^()]*\))?(?: in goroutine \d+)?$")
        .expect("Invalid call regex")
});

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s+(.+?):(\d+)(?:\s.*)?$").expect("Invalid location regex")
});

/// Result of parsing a raw dump.
///
/// A malformed goroutine block is dropped and reported in `failures`; the
/// other blocks are still returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDump {
    pub goroutines: Vec<Goroutine>,
    pub failures: Vec<RenderError>,
}

/// A goroutine block being read.
struct Block {
    goroutine: Goroutine,
    pending_call: Option<(usize, String)>,
    error: Option<RenderError>,
}

impl Block {
    fn feed(&mut self, line_no: usize, line: &str) {
        if self.error.is_some() {
            return;
        }

        if let Some((at, call)) = self.pending_call.take() {
            let Some(caps) = LOCATION_RE.captures(line) else {
                self.error = Some(self.malformed(at, format!("call '{}' has no source location", call)));
                return;
            };
            match caps[2].parse::<u32>() {
                Ok(number) => self
                    .goroutine
                    .frames
                    .push(StackFrame::new(call, &caps[1], number)),
                Err(e) => self.error = Some(self.malformed(line_no, e.to_string())),
            }
            return;
        }

        // Elision marker between deep frames.
        if line.trim_start().starts_with("...") {
            return;
        }
        if line.starts_with(char::is_whitespace) {
            self.error = Some(self.malformed(line_no, format!("unexpected line '{}'", line.trim())));
            return;
        }

        if let Some(caps) = CALL_RE.captures(line) {
            self.pending_call = Some((line_no, caps[1].to_string()));
        }
    }

    fn finish(mut self, parsed: &mut ParsedDump) {
        // A dangling last line is trailing output once frames were read.
        if let Some((at, call)) = self.pending_call.take() {
            if self.goroutine.frames.is_empty() {
                self.error = Some(self.malformed(at, format!("call '{}' has no source location", call)));
            } else {
                debug!("Ignoring trailing line {} after goroutine {}", at, self.goroutine.id);
            }
        }
        match self.error {
            Some(err) => {
                warn!("Skipping goroutine {}: {}", self.goroutine.id, err);
                parsed.failures.push(err);
            }
            None => parsed.goroutines.push(self.goroutine),
        }
    }

    fn malformed(&self, line: usize, message: String) -> RenderError {
        RenderError::MalformedDump {
            line,
            message: format!("goroutine {}: {}", self.goroutine.id, message),
        }
    }
}

/// Parse the text of a Go stack dump (`runtime.Stack` / panic output).
///
/// Each goroutine block starts at a `goroutine N [state]:` header and ends
/// at a blank line. Text outside blocks, such as the panic message or a
/// trailing `exit status 2`, is ignored. Each frame is a call line followed
/// by an indented `file:line` line.
pub fn parse_goroutine_dump(dump: &str) -> ParsedDump {
    let mut parsed = ParsedDump::default();
    let mut current: Option<Block> = None;

    for (idx, raw) in dump.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();

        if line.is_empty() {
            if let Some(block) = current.take() {
                block.finish(&mut parsed);
            }
            continue;
        }

        if let Some(caps) = HEADER_RE.captures(line) {
            if let Some(block) = current.take() {
                block.finish(&mut parsed);
            }
            match caps[1].parse::<u64>() {
                Ok(id) => {
                    current = Some(Block {
                        goroutine: Goroutine {
                            id: GoroutineId::Number(id),
                            state: Some(caps[2].to_string()),
                            frames: Vec::new(),
                        },
                        pending_call: None,
                        error: None,
                    })
                }
                Err(e) => parsed.failures.push(RenderError::MalformedDump {
                    line: line_no,
                    message: e.to_string(),
                }),
            }
            continue;
        }

        if let Some(block) = current.as_mut() {
            block.feed(line_no, line);
        }
    }

    if let Some(block) = current.take() {
        block.finish(&mut parsed);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "panic: boom

goroutine 1 [running]:
main.(*Server).handle(0xc000010000, {0x4b2f20, 0x5})
\t/home/dev/app/server.go:42 +0x1d
main.main()
\t/home/dev/app/main.go:10 +0x25

goroutine 7 [chan receive, 2 minutes]:
github.com/x/pkg.Wait(...)
\t/root/go/pkg/mod/github.com/x/pkg@v1.2.3/wait.go:7
created by main.main in goroutine 1
\t/home/dev/app/main.go:9 +0x3c
";

    #[test]
    fn test_parse_dump() {
        let parsed = parse_goroutine_dump(DUMP);
        assert!(parsed.failures.is_empty());
        let goroutines = parsed.goroutines;
        assert_eq!(goroutines.len(), 2);

        let first = &goroutines[0];
        assert_eq!(first.id, GoroutineId::Number(1));
        assert_eq!(first.state.as_deref(), Some("running"));
        assert_eq!(
            first.frames,
            vec![
                StackFrame::new("main.(*Server).handle", "/home/dev/app/server.go", 42),
                StackFrame::new("main.main", "/home/dev/app/main.go", 10),
            ]
        );

        let second = &goroutines[1];
        assert_eq!(second.state.as_deref(), Some("chan receive, 2 minutes"));
        assert_eq!(second.frames[0].function_name, "github.com/x/pkg.Wait");
        assert_eq!(second.frames[0].line, 7);
        assert_eq!(second.frames[1].function_name, "main.main");
    }

    #[test]
    fn test_parse_dump_missing_location() {
        let parsed = parse_goroutine_dump("goroutine 1 [running]:\nmain.main()\n");
        assert!(parsed.goroutines.is_empty());
        assert!(matches!(
            parsed.failures.as_slice(),
            [RenderError::MalformedDump { line: 2, .. }]
        ));
    }

    #[test]
    fn test_extended_header_on_first_goroutine() {
        let dump = "panic: boom

goroutine 1 gp=0xc000002380 m=0 mp=0x5a1b20 [running]:
main.main()
\t/src/example.com/app/main.go:10 +0x25 fp=0xc000067f50 sp=0xc000067f28 pc=0x47e5a5

goroutine 7 [select]:
main.worker()
\t/src/example.com/app/worker.go:21 +0x3c
";
        let parsed = parse_goroutine_dump(dump);
        assert!(parsed.failures.is_empty());
        assert_eq!(parsed.goroutines.len(), 2);

        let first = &parsed.goroutines[0];
        assert_eq!(first.id, GoroutineId::Number(1));
        assert_eq!(first.state.as_deref(), Some("running"));
        assert_eq!(
            first.frames,
            vec![StackFrame::new("main.main", "/src/example.com/app/main.go", 10)]
        );
    }

    #[test]
    fn test_extended_header_mid_dump() {
        let dump = "goroutine 1 [running]:
main.main()
\t/src/example.com/app/main.go:10 +0x25

goroutine 2 gp=0xc000003 m=nil [select]:
main.worker()
\t/src/example.com/app/worker.go:21 +0x3c
";
        let parsed = parse_goroutine_dump(dump);
        assert!(parsed.failures.is_empty());
        let ids: Vec<_> = parsed.goroutines.iter().map(|g| g.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(parsed.goroutines[1].state.as_deref(), Some("select"));
        assert_eq!(parsed.goroutines[1].frames[0].line, 21);
    }

    #[test]
    fn test_malformed_block_is_isolated() {
        let dump = "goroutine 1 [running]:
main.main()
\t/src/example.com/app/main.go:10 +0x25

goroutine 2 [select]:
main.worker()
main.other()
\t/src/example.com/app/worker.go:21

goroutine 3 [IO wait]:
main.reader()
\t/src/example.com/app/reader.go:5
exit status 2
";
        let parsed = parse_goroutine_dump(dump);
        let ids: Vec<_> = parsed.goroutines.iter().map(|g| g.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(parsed.failures.len(), 1);
        assert!(matches!(
            &parsed.failures[0],
            RenderError::MalformedDump { line: 6, message } if message.starts_with("goroutine 2:")
        ));
    }

    #[test]
    fn test_trailing_text_after_blank_line_is_ignored() {
        let dump = "goroutine 1 [running]:
main.main()
\t/src/example.com/app/main.go:10 +0x25

exit status 2
";
        let parsed = parse_goroutine_dump(dump);
        assert!(parsed.failures.is_empty());
        assert_eq!(parsed.goroutines.len(), 1);
        assert_eq!(parsed.goroutines[0].frames.len(), 1);
    }

    #[test]
    fn test_goroutine_id_number_or_string() {
        let g: Goroutine = serde_json::from_str(r#"{"ID": 12, "Frames": []}"#).unwrap();
        assert_eq!(g.id.to_string(), "12");

        let g: Goroutine = serde_json::from_str(r#"{"ID": "g-12", "Frames": []}"#).unwrap();
        assert_eq!(g.id, GoroutineId::Text("g-12".to_string()));
    }

    #[test]
    fn test_negative_line_rejected() {
        let result: Result<StackFrame, _> =
            serde_json::from_str(r#"{"FunctionName":"f","File":"/f.go","Line":-1}"#);
        assert!(result.is_err());
    }
}
