//! Mock page host and viewing surface for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use url::Url;

use crate::navigation::Menu;
use crate::traits::{PageHost, SurfaceLoad, ViewingSurface};

/// In-memory page host.
///
/// Records every `write_location` call so tests can check that fragment
/// and title always change together.
#[derive(Debug)]
pub struct MockPageHost {
    origin: Url,
    fragment: Mutex<String>,
    title: Mutex<String>,
    menu: Mutex<Option<Menu>>,
    writes: Mutex<Vec<(String, String)>>,
    reloads: AtomicUsize,
}

impl MockPageHost {
    /// Create a host at `origin` with an empty fragment and no menu.
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            fragment: Mutex::new(String::new()),
            title: Mutex::new("crashview".to_string()),
            menu: Mutex::new(None),
            writes: Mutex::new(Vec::new()),
            reloads: AtomicUsize::new(0),
        }
    }

    /// Set the fragment as if the user typed it in the address bar.
    pub fn with_fragment(self, fragment: &str) -> Self {
        *self.fragment.lock().unwrap() = fragment.to_string();
        self
    }

    /// Install a navigation menu.
    pub fn with_menu(self, menu: Menu) -> Self {
        *self.menu.lock().unwrap() = Some(menu);
        self
    }

    /// Every `(fragment, title)` pair written, in order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    /// Number of full reloads requested.
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl PageHost for MockPageHost {
    fn origin(&self) -> Url {
        self.origin.clone()
    }

    fn fragment(&self) -> String {
        self.fragment.lock().unwrap().clone()
    }

    fn title(&self) -> String {
        self.title.lock().unwrap().clone()
    }

    fn write_location(&self, fragment: &str, title: &str) {
        *self.fragment.lock().unwrap() = fragment.to_string();
        *self.title.lock().unwrap() = title.to_string();
        self.writes
            .lock()
            .unwrap()
            .push((fragment.to_string(), title.to_string()));
    }

    fn menu(&self) -> Option<Menu> {
        self.menu.lock().unwrap().clone()
    }

    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory viewing surface.
///
/// Every `set_source` completes immediately with a load whose title comes
/// from the title map (keyed by path). Loads caused by links clicked inside
/// the surface are injected through a [`MockSurfaceHandle`].
#[derive(Debug)]
pub struct MockSurface {
    titles: HashMap<String, String>,
    sources: Arc<Mutex<Vec<Url>>>,
    loads_tx: mpsc::UnboundedSender<SurfaceLoad>,
    loads_rx: mpsc::UnboundedReceiver<SurfaceLoad>,
}

/// Cloneable handle onto a [`MockSurface`].
#[derive(Debug, Clone)]
pub struct MockSurfaceHandle {
    sources: Arc<Mutex<Vec<Url>>>,
    loads_tx: mpsc::UnboundedSender<SurfaceLoad>,
}

impl MockSurface {
    pub fn new() -> Self {
        let (loads_tx, loads_rx) = mpsc::unbounded_channel();
        Self {
            titles: HashMap::new(),
            sources: Arc::new(Mutex::new(Vec::new())),
            loads_tx,
            loads_rx,
        }
    }

    /// Title reported when a document at `path` loads.
    pub fn with_title(mut self, path: &str, title: &str) -> Self {
        self.titles.insert(path.to_string(), title.to_string());
        self
    }

    pub fn handle(&self) -> MockSurfaceHandle {
        MockSurfaceHandle {
            sources: Arc::clone(&self.sources),
            loads_tx: self.loads_tx.clone(),
        }
    }
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSurfaceHandle {
    /// Sources set on the surface, in order.
    pub fn sources(&self) -> Vec<Url> {
        self.sources.lock().unwrap().clone()
    }

    /// Simulate a navigation that happened inside the surface.
    pub fn inject_load(&self, location: Url, title: &str) {
        let _ = self.loads_tx.send(SurfaceLoad {
            location,
            title: title.to_string(),
        });
    }
}

#[async_trait]
impl ViewingSurface for MockSurface {
    fn set_source(&mut self, url: &Url) {
        self.sources.lock().unwrap().push(url.clone());
        let title = self.titles.get(url.path()).cloned().unwrap_or_default();
        let _ = self.loads_tx.send(SurfaceLoad {
            location: url.clone(),
            title,
        });
    }

    async fn next_load(&mut self) -> Option<SurfaceLoad> {
        self.loads_rx.recv().await
    }
}
