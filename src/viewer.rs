//! Viewer orchestration.
//!
//! Wires the connection monitor to the frame navigator: nothing is shown
//! until the backend answers, the navigator re-runs after a resume and a
//! full reload ends the session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::connection::{
    reload_channel_url, ConnectionMonitor, HeartbeatProbe, MonitorEvent, MonitorExit,
    MonitorHandle, ReloadReason,
};
use crate::error::{NavigationError, NetworkError, ViewerError, ViewerResult};
use crate::navigation::FrameNavigator;
use crate::startup::ViewerConfig;
use crate::traits::{HttpClient, PageHost, ReloadChannelConnector, ViewingSurface};

/// How a viewer session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerExit {
    /// The host page was asked to reload.
    Reloaded(ReloadReason),
    /// The viewing surface went away.
    SurfaceClosed,
}

pub struct Viewer<C, R, H, S>
where
    C: HttpClient + 'static,
    R: ReloadChannelConnector + 'static,
    H: PageHost,
    S: ViewingSurface,
{
    monitor: ConnectionMonitor<C, R>,
    navigator: FrameNavigator<C, H, S>,
    host: Arc<H>,
}

impl<C, R, H, S> Viewer<C, R, H, S>
where
    C: HttpClient + 'static,
    R: ReloadChannelConnector + 'static,
    H: PageHost,
    S: ViewingSurface,
{
    pub fn new(
        config: &ViewerConfig,
        http: Arc<C>,
        connector: Arc<R>,
        host: Arc<H>,
        surface: S,
    ) -> ViewerResult<Self> {
        let probe = HeartbeatProbe::new(Arc::clone(&http), &config.origin, &config.heartbeat_path)?
            .with_interval(config.heartbeat_interval);
        let channel_url = reload_channel_url(&config.origin, &config.reload_path)?;
        let monitor = ConnectionMonitor::new(probe, connector, channel_url);
        let navigator = FrameNavigator::new(http, Arc::clone(&host), surface)
            .with_fallback_classes(config.fallback_classes.clone());

        Ok(Self {
            monitor,
            navigator,
            host,
        })
    }

    /// Run until the page reloads or the surface closes.
    pub async fn run(self) -> ViewerResult<ViewerExit> {
        let Viewer {
            monitor,
            mut navigator,
            host,
        } = self;
        let MonitorHandle {
            startup,
            mut events,
            mut task,
            ..
        } = monitor.spawn();

        if startup.await.is_err() {
            // The monitor finished before the backend was ever seen online.
            let exit = (&mut task).await.map_err(monitor_stopped)?;
            return Ok(finish(host.as_ref(), exit));
        }

        if let Err(e) = navigator.navigate().await {
            task.abort();
            return surface_or_error(e);
        }

        loop {
            tokio::select! {
                exit = &mut task => {
                    let exit = exit.map_err(monitor_stopped)?;
                    return Ok(finish(host.as_ref(), exit));
                }
                Some(event) = events.recv() => match event {
                    MonitorEvent::Resumed => {
                        info!("Re-running navigation after resume");
                        if let Err(e) = navigator.navigate().await {
                            task.abort();
                            return surface_or_error(e);
                        }
                    }
                    MonitorEvent::Offline => {
                        warn!("Backend offline, waiting for it to come back");
                    }
                },
                load = navigator.sync_next_load() => {
                    if let Err(e) = load {
                        task.abort();
                        return surface_or_error(e);
                    }
                }
            }
        }
    }
}

fn finish<H: PageHost>(host: &H, exit: MonitorExit) -> ViewerExit {
    match exit {
        MonitorExit::Reload(reason) => {
            debug!("Reloading host page ({:?})", reason);
            host.reload();
            ViewerExit::Reloaded(reason)
        }
    }
}

fn surface_or_error(err: NavigationError) -> ViewerResult<ViewerExit> {
    match err {
        NavigationError::SurfaceClosed => Ok(ViewerExit::SurfaceClosed),
        other => Err(other.into()),
    }
}

fn monitor_stopped(err: tokio::task::JoinError) -> ViewerError {
    ViewerError::Network(NetworkError::Other {
        message: format!("connection monitor stopped: {}", err),
    })
}
