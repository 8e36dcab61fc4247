//! Deep-link resolution and address-bar synchronization.

mod common;

use std::sync::Arc;

use common::*;
use crashview::error::NavigationError;
use crashview::navigation::{FrameNavigator, Menu, MenuEntry, Provenance};
use crashview::traits::PageHost;
use url::Url;

type TestNavigator = FrameNavigator<MockHttpClient, MockPageHost, MockSurface>;

fn navigator_with(host: MockPageHost, http: MockHttpClient, surface: MockSurface) -> TestNavigator {
    FrameNavigator::new(Arc::new(http), Arc::new(host), surface)
}

#[tokio::test]
async fn test_deep_link_with_query_is_followed() {
    let http = MockHttpConfig::new()
        .with_not_found_default()
        .build();
    http.set_response(
        "http://localhost:8080/heap/top?si=alloc_space",
        MockResponse::ok(),
    );
    let host = report_host("#%2Fheap%2Ftop%3Fsi%3Dalloc_space");
    let surface = MockSurface::new().with_title("/heap/top", "Top allocations");
    let handle = surface.handle();
    let mut nav = navigator_with(host, http, surface);

    let target = nav.navigate().await.unwrap();

    assert_eq!(target.provenance, Provenance::DeepLink);
    assert_eq!(handle.sources(), vec![target.url.clone()]);
    assert_eq!(
        nav.host().writes(),
        vec![(
            "%2Fheap%2Ftop%3Fsi%3Dalloc_space".to_string(),
            "Top allocations".to_string()
        )]
    );
}

#[tokio::test]
async fn test_unreachable_page_uses_default_entry() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::refused());
    let mut nav = navigator_with(
        report_host("#%2Fdebug%2Fpprof"),
        http,
        MockSurface::new().with_title("/stacktrace", "Stack trace"),
    );

    let target = nav.navigate().await.unwrap();

    assert_eq!(target.provenance, Provenance::Fallback);
    assert_eq!(target.url.path(), "/stacktrace");
    // The fragment is cleared first, then the loaded page is recorded.
    assert_eq!(
        nav.host().writes(),
        vec![
            (String::new(), "crashview".to_string()),
            ("%2Fstacktrace".to_string(), "Stack trace".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_default_entry_priority() {
    // No stack trace in the menu: Info wins over the first entry.
    let menu = Menu::new(vec![
        MenuEntry::new("Heap", "/heap").with_class("heap"),
        MenuEntry::new("Info", "/info").with_class("Info"),
    ]);
    let host = MockPageHost::new(origin()).with_menu(menu);
    let nav = navigator_with(host, MockHttpClient::new(), MockSurface::new());
    assert_eq!(nav.resolve().await.unwrap().url.path(), "/info");

    // Neither class present: first entry.
    let menu = Menu::new(vec![
        MenuEntry::new("Goroutines", "/goroutines").with_class("goroutines"),
        MenuEntry::new("Heap", "/heap").with_class("heap"),
    ]);
    let host = MockPageHost::new(origin()).with_menu(menu);
    let nav = navigator_with(host, MockHttpClient::new(), MockSurface::new());
    assert_eq!(nav.resolve().await.unwrap().url.path(), "/goroutines");
}

#[tokio::test]
async fn test_empty_menu_is_an_error() {
    let host = MockPageHost::new(origin()).with_menu(Menu::new(Vec::new()));
    let nav = navigator_with(host, MockHttpClient::new(), MockSurface::new());

    assert_eq!(nav.resolve().await.unwrap_err(), NavigationError::EmptyMenu);
}

#[tokio::test]
async fn test_loads_inside_surface_are_mirrored() {
    let http = MockHttpConfig::new().with_page("/info").build();
    let surface = MockSurface::new().with_title("/info", "Info");
    let handle = surface.handle();
    let mut nav = navigator_with(report_host("#%2Finfo"), http, surface);

    nav.navigate().await.unwrap();

    // The user follows links inside the displayed document.
    handle.inject_load(
        Url::parse("http://localhost:8080/allocs?debug=1").unwrap(),
        "Allocations",
    );
    handle.inject_load(Url::parse("http://localhost:8080/heap").unwrap(), "");

    let first = nav.sync_next_load().await.unwrap();
    assert_eq!(first.title, "Allocations");
    nav.sync_next_load().await.unwrap();

    let host = nav.host();
    assert_eq!(
        host.writes(),
        vec![
            ("%2Finfo".to_string(), "Info".to_string()),
            ("%2Fallocs%3Fdebug%3D1".to_string(), "Allocations".to_string()),
            ("%2Fheap".to_string(), String::new()),
        ]
    );
    assert_eq!(host.fragment(), "%2Fheap");
    assert_eq!(handle.sources().len(), 1);
}

#[tokio::test]
async fn test_navigate_again_uses_current_fragment() {
    let http = MockHttpConfig::new()
        .with_page("/info")
        .with_page("/heap")
        .build();
    let surface = MockSurface::new()
        .with_title("/info", "Info")
        .with_title("/heap", "Heap");
    let handle = surface.handle();
    let mut nav = navigator_with(report_host("#%2Finfo"), http, surface);

    nav.navigate().await.unwrap();
    handle.inject_load(Url::parse("http://localhost:8080/heap").unwrap(), "Heap");
    nav.sync_next_load().await.unwrap();

    // A second navigation picks up where the user left off.
    let target = nav.navigate().await.unwrap();
    assert_eq!(target.url.path(), "/heap");
    assert_eq!(target.provenance, Provenance::DeepLink);
    assert_eq!(nav.current().map(|t| t.url.path()), Some("/heap"));
    assert_eq!(handle.sources().len(), 2);
}
