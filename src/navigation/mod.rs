//! Deep-link navigation for the viewing surface.

pub mod fragment;
pub mod menu;
pub mod navigator;

pub use menu::{Menu, MenuEntry};
pub use navigator::{
    FrameNavigator, NavigationTarget, Provenance, DEFAULT_FALLBACK_CLASSES,
};
