//! Frame navigator.
//!
//! Decides which sub-document the viewing surface shows and keeps the host's
//! fragment and title in step with whatever the surface loads.

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::NavigationError;
use crate::navigation::fragment;
use crate::traits::{Headers, HttpClient, PageHost, SurfaceLoad, ViewingSurface};

/// Default-entry classes, highest priority first.
pub const DEFAULT_FALLBACK_CLASSES: [&str; 2] = ["stacktrace", "Info"];

/// Where a navigation target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Taken from the address-bar fragment and confirmed to exist.
    DeepLink,
    /// The default menu entry, used when no deep link could be followed.
    Fallback,
}

/// A resolved navigation decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub url: Url,
    pub provenance: Provenance,
}

/// Keeps the viewing surface and the host address bar synchronized.
pub struct FrameNavigator<C: HttpClient, H: PageHost, S: ViewingSurface> {
    http: Arc<C>,
    host: Arc<H>,
    surface: S,
    fallback_classes: Vec<String>,
    current: Option<NavigationTarget>,
}

impl<C: HttpClient, H: PageHost, S: ViewingSurface> FrameNavigator<C, H, S> {
    pub fn new(http: Arc<C>, host: Arc<H>, surface: S) -> Self {
        Self {
            http,
            host,
            surface,
            fallback_classes: DEFAULT_FALLBACK_CLASSES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            current: None,
        }
    }

    /// Replace the default-entry classes (highest priority first).
    pub fn with_fallback_classes(mut self, classes: Vec<String>) -> Self {
        self.fallback_classes = classes;
        self
    }

    /// The target of the last navigation, if any.
    pub fn current(&self) -> Option<&NavigationTarget> {
        self.current.as_ref()
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Decide what to display.
    ///
    /// Follows the deep link when it resolves on the origin and exists,
    /// otherwise clears the fragment and picks the default menu entry.
    pub async fn resolve(&self) -> Result<NavigationTarget, NavigationError> {
        match self.deep_link().await {
            Ok(url) => {
                debug!("Following deep link {}", url);
                Ok(NavigationTarget {
                    url,
                    provenance: Provenance::DeepLink,
                })
            }
            Err(e) if e.falls_back() => {
                info!("Using default page: {}", e);
                self.fallback()
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve a target, display it and wait for it to load.
    ///
    /// Holding `&mut self` for the whole call keeps navigations from
    /// interleaving.
    pub async fn navigate(&mut self) -> Result<NavigationTarget, NavigationError> {
        let target = self.resolve().await?;
        self.surface.set_source(&target.url);
        self.current = Some(target.clone());

        self.sync_next_load().await?;
        Ok(target)
    }

    /// Wait for the surface's next load and mirror it into the address bar.
    pub async fn sync_next_load(&mut self) -> Result<SurfaceLoad, NavigationError> {
        let load = self
            .surface
            .next_load()
            .await
            .ok_or(NavigationError::SurfaceClosed)?;
        self.sync(&load);
        Ok(load)
    }

    fn sync(&self, load: &SurfaceLoad) {
        let fragment = fragment::encode(&load.location);
        debug!("Surface loaded {} ({})", load.location, load.title);
        self.host.write_location(&fragment, &load.title);
    }

    async fn deep_link(&self) -> Result<Url, NavigationError> {
        let raw = self.host.fragment();
        let decoded = fragment::decode(&raw)?;
        if decoded.is_empty() {
            return Err(NavigationError::EmptyFragment);
        }

        let origin = self.host.origin();
        let url = origin
            .join(&decoded)
            .map_err(|e| NavigationError::InvalidPath {
                fragment: decoded.clone(),
                message: e.to_string(),
            })?;
        if url.origin() != origin.origin() {
            return Err(NavigationError::OffOrigin { fragment: decoded });
        }

        match self.http.get(url.as_str(), &Headers::new()).await {
            Ok(response) if response.is_success() => Ok(url),
            Ok(response) => Err(NavigationError::Unavailable {
                url: url.to_string(),
                message: format!("HTTP {}", response.status),
            }),
            Err(e) => Err(NavigationError::Unavailable {
                url: url.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn fallback(&self) -> Result<NavigationTarget, NavigationError> {
        let menu = self.host.menu().ok_or_else(|| {
            warn!("Host page has no navigation menu");
            NavigationError::EmptyMenu
        })?;
        let entry = menu
            .element_or_default(self.fallback_classes.as_slice())
            .ok_or(NavigationError::EmptyMenu)?;

        let url = self
            .host
            .origin()
            .join(&entry.href)
            .map_err(|_| NavigationError::InvalidMenuHref {
                name: entry.name.clone(),
                href: entry.href.clone(),
            })?;

        self.host.write_location("", &self.host.title());
        Ok(NavigationTarget {
            url,
            provenance: Provenance::Fallback,
        })
    }
}
