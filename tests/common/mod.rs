//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures for the viewer's integration tests:
//! a backend origin, a report menu, a fast config and sample payloads.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::time::Duration;

use crashview::navigation::{Menu, MenuEntry};
use crashview::startup::ViewerConfig;
use url::Url;

/// Origin every fixture is served from.
pub const ORIGIN: &str = "http://localhost:8080/";

pub fn origin() -> Url {
    Url::parse(ORIGIN).unwrap()
}

/// Config with a heartbeat fast enough for tests.
pub fn fast_config() -> ViewerConfig {
    ViewerConfig::default()
        .with_origin(ORIGIN)
        .unwrap()
        .with_heartbeat_interval(Duration::from_millis(1))
}

/// The menu of a backend serving a full report.
pub fn report_menu() -> Menu {
    Menu::new(vec![
        MenuEntry::new("Heap", "/heap").with_class("heap"),
        MenuEntry::new("Info", "/info").with_class("Info"),
        MenuEntry::new("Stack trace", "/stacktrace").with_class("stacktrace"),
    ])
}

/// Page host at [`ORIGIN`] with [`report_menu`].
pub fn report_host(fragment: &str) -> MockPageHost {
    MockPageHost::new(origin())
        .with_fragment(fragment)
        .with_menu(report_menu())
}

/// A report payload with one external dependency and two goroutines.
pub const SAMPLE_PAYLOAD: &str = r#"{
    "SysInfo": {"Arch": "amd64", "OS": "linux", "Compiler": "gc", "GoVersion": "go1.21.4"},
    "Build": {
        "Main": {"Path": "example.com/app", "Version": "(devel)"},
        "Deps": [
            {"Path": "github.com/x/pkg", "Version": "v1.2.3"},
            {"Path": "github.com/x/pkg/sub", "Version": "v1.2.3"}
        ]
    },
    "Stack": [
        {"ID": 1, "State": "running", "Frames": [
            {"FunctionName": "github.com/x/pkg/sub.Do", "File": "/root/go/pkg/mod/github.com/x/pkg@v1.2.3/sub/do.go", "Line": 12},
            {"FunctionName": "github.com/x/pkg.Foo", "File": "/src/github.com/x/pkg/file.go", "Line": 42},
            {"FunctionName": "main.main", "File": "/src/example.com/app/main.go", "Line": 7}
        ]},
        {"ID": "bg-2", "Frames": [
            {"FunctionName": "runtime.gopark", "File": "/usr/local/go/src/runtime/proc.go", "Line": 398}
        ]}
    ]
}"#;
