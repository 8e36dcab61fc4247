//! Reconnect state machine.
//!
//! Pure bookkeeping: no I/O, no timers. The driver in
//! [`monitor`](super::monitor) feeds it probe results and channel events and
//! acts on the decisions it returns.

use crate::traits::ChannelEvent;

/// Backend connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// The live-reload channel closed; probing again.
    Offline,
    /// Probing before the first successful heartbeat.
    AwaitingOnline,
    /// The backend answered and the channel is (being) opened.
    Online,
}

/// What to do after a successful probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeDecision {
    /// First time online: open the channel and release the navigator.
    Startup,
    /// Back online without having seen the previous channel open.
    Resume,
    /// The backend restarted under a page that was live: reload everything.
    Reload,
}

/// What to do after a channel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelDecision {
    /// Keep listening.
    Continue,
    /// Fresh data was announced: reload everything.
    Reload,
    /// The channel is gone: probe again.
    Reprobe,
}

#[derive(Debug, Clone)]
pub struct MonitorState {
    state: ConnectionState,
    should_reload: bool,
    startup_signalled: bool,
}

impl MonitorState {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::AwaitingOnline,
            should_reload: false,
            startup_signalled: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether a channel of this page has ever opened.
    pub fn should_reload(&self) -> bool {
        self.should_reload
    }

    pub fn startup_signalled(&self) -> bool {
        self.startup_signalled
    }

    pub fn on_probe_success(&mut self) -> ProbeDecision {
        if self.should_reload {
            return ProbeDecision::Reload;
        }

        self.state = ConnectionState::Online;
        if self.startup_signalled {
            ProbeDecision::Resume
        } else {
            self.startup_signalled = true;
            ProbeDecision::Startup
        }
    }

    pub fn on_channel_event(&mut self, event: &ChannelEvent) -> ChannelDecision {
        match event {
            ChannelEvent::Opened => {
                self.should_reload = true;
                ChannelDecision::Continue
            }
            ChannelEvent::Message(_) => ChannelDecision::Reload,
            ChannelEvent::Closed => {
                self.state = ConnectionState::Offline;
                ChannelDecision::Reprobe
            }
        }
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}
