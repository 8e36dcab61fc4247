//! Headless page host for the command line.
//!
//! The address bar and title live in memory and every change is logged.
//! The surface fetches each document with the HTTP client and reports its
//! `<title>` once the body has arrived.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::mpsc;
use tracing::{info, warn};
use url::Url;

use crate::navigation::Menu;
use crate::traits::{Headers, HttpClient, PageHost, SurfaceLoad, ViewingSurface};

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("Invalid title regex pattern")
});

/// Extract the text of the first `<title>` element.
pub fn extract_title(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .map(|caps| caps[1].trim().to_string())
        .filter(|title| !title.is_empty())
}

pub struct ConsoleHost {
    origin: Url,
    location: Mutex<(String, String)>,
    menu: Menu,
    reload_requested: AtomicBool,
}

impl ConsoleHost {
    pub fn new(origin: Url, fragment: &str, menu: Menu) -> Self {
        Self {
            origin,
            location: Mutex::new((fragment.to_string(), "crashview".to_string())),
            menu,
            reload_requested: AtomicBool::new(false),
        }
    }

    /// Whether a reload was requested since the last call, clearing the flag.
    pub fn take_reload(&self) -> bool {
        self.reload_requested.swap(false, Ordering::SeqCst)
    }

    fn location(&self) -> std::sync::MutexGuard<'_, (String, String)> {
        match self.location.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl PageHost for ConsoleHost {
    fn origin(&self) -> Url {
        self.origin.clone()
    }

    fn fragment(&self) -> String {
        self.location().0.clone()
    }

    fn title(&self) -> String {
        self.location().1.clone()
    }

    fn write_location(&self, fragment: &str, title: &str) {
        *self.location() = (fragment.to_string(), title.to_string());
        info!("{}#{} - {}", self.origin, fragment, title);
    }

    fn menu(&self) -> Option<Menu> {
        Some(self.menu.clone())
    }

    fn reload(&self) {
        info!("Reloading viewer");
        self.reload_requested.store(true, Ordering::SeqCst);
    }
}

pub struct ConsoleSurface<C: HttpClient + 'static> {
    http: Arc<C>,
    loads_tx: mpsc::UnboundedSender<SurfaceLoad>,
    loads_rx: mpsc::UnboundedReceiver<SurfaceLoad>,
}

impl<C: HttpClient + 'static> ConsoleSurface<C> {
    pub fn new(http: Arc<C>) -> Self {
        let (loads_tx, loads_rx) = mpsc::unbounded_channel();
        Self {
            http,
            loads_tx,
            loads_rx,
        }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ViewingSurface for ConsoleSurface<C> {
    fn set_source(&mut self, url: &Url) {
        let http = Arc::clone(&self.http);
        let tx = self.loads_tx.clone();
        let location = url.clone();
        tokio::spawn(async move {
            let title = match http.get(location.as_str(), &Headers::new()).await {
                Ok(response) => response
                    .text()
                    .ok()
                    .and_then(|body| extract_title(&body))
                    .unwrap_or_else(|| location.path().to_string()),
                Err(e) => {
                    warn!("Failed to load {}: {}", location, e);
                    location.path().to_string()
                }
            };
            let _ = tx.send(SurfaceLoad { location, title });
        });
    }

    async fn next_load(&mut self) -> Option<SurfaceLoad> {
        self.loads_rx.recv().await
    }
}
