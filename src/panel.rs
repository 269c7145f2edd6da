//! Panel & Desktop Window Interfaces
//!
//! Docks reserve screen edges and are tracked by the panel manager;
//! desktop (wallpaper-style) windows only need stacking registration.
//! The dispatcher forwards the raw observations; policy lives behind
//! these traits.

use x11rb::protocol::xproto::{Atom, Window};

use crate::geometry::Rect;

/// Dock/panel tracking.
pub trait PanelManager {
    /// Track `window` as a panel.
    fn register_panel(&mut self, window: Window);

    /// Stop tracking `window`; a no-op if it was never a panel.
    fn unregister_panel(&mut self, window: Window);

    /// A property changed on a window that may be a panel (struts,
    /// title).
    fn property_changed(&mut self, window: Window, atom: Atom);

    /// A tracked window was moved or resized.
    fn geometry_changed(&mut self, window: Window, geometry: Rect);

    /// The root window changed size.
    fn root_geometry_changed(&mut self, width: u16, height: u16);
}

/// Desktop-window registry.
pub trait DesktopWindows {
    /// Track `window` as a desktop window.
    fn register(&mut self, window: Window);

    /// Stop tracking `window`; a no-op if it was never registered.
    fn unregister(&mut self, window: Window);
}
