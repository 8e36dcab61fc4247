//! Host page and viewing-surface abstractions.
//!
//! The viewer runs inside a page that owns an address bar, a title and an
//! embedded viewing surface (an iframe in a browser). These traits are the
//! only way the core touches them.

use async_trait::async_trait;
use url::Url;

use crate::navigation::Menu;

/// The page hosting the viewer.
pub trait PageHost: Send + Sync {
    /// The origin sub-documents are resolved against.
    fn origin(&self) -> Url;

    /// The current address-bar fragment, with or without the leading `#`.
    fn fragment(&self) -> String;

    /// The current document title.
    fn title(&self) -> String;

    /// Replace the fragment and the title in one step.
    ///
    /// The two are shared state; writing them separately would let an
    /// observer see a fragment that does not match the title.
    fn write_location(&self, fragment: &str, title: &str);

    /// The navigation menu shown by the page, if it has one.
    fn menu(&self) -> Option<Menu>;

    /// Discard the current execution context and load the page again.
    fn reload(&self);
}

/// One completed load of the viewing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLoad {
    /// Location of the loaded sub-document.
    pub location: Url,
    /// Title of the loaded sub-document.
    pub title: String,
}

/// The embedded surface sub-documents are displayed in.
#[async_trait]
pub trait ViewingSurface: Send {
    /// Point the surface at `url`. Completion is reported by [`next_load`].
    ///
    /// [`next_load`]: ViewingSurface::next_load
    fn set_source(&mut self, url: &Url);

    /// Wait for the next load event, including loads caused by navigation
    /// inside the surface. Returns `None` once the surface is gone.
    async fn next_load(&mut self) -> Option<SurfaceLoad>;
}
