//! EWMH Library Interface
//!
//! The extended-window-manager-hints library owns atom interning,
//! property reads and client-message interpretation. The dispatcher only
//! needs classification queries, the previous window manager's client
//! list, and the identity of the WM selection it must watch for
//! replacement.

use x11rb::protocol::xproto::{Atom, ClientMessageEvent, Window};

/// EWMH window-type classification, reduced to what event dispatch
/// distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    /// `_NET_WM_WINDOW_TYPE_DESKTOP`: a wallpaper-style background
    /// window.
    Desktop,
    /// `_NET_WM_WINDOW_TYPE_DOCK`: a panel reserving screen edges.
    Dock,
    /// Anything else, including windows without the property.
    Other,
}

/// The EWMH property library.
pub trait Ewmh {
    /// Interpret an EWMH client message (activation, state toggles,
    /// desktop switches, ...).
    fn handle_client_message(&mut self, event: &ClientMessageEvent);

    /// Whether `window` was created by this window manager.
    fn is_own_window(&self, window: Window) -> bool;

    /// Classify `window` by its `_NET_WM_WINDOW_TYPE`.
    fn window_type(&mut self, window: Window) -> WindowType;

    /// `_NET_CLIENT_LIST` as left behind by the previous window manager,
    /// recorded before this one took over.
    fn original_client_list(&self) -> Vec<Window>;

    /// The desktop index recorded in the window's `_NET_WM_DESKTOP`
    /// property, if present and valid.
    fn initial_desktop(&mut self, window: Window) -> Option<usize>;

    /// The `WM_Sn` manager selection atom for our screen.
    fn wm_selection(&self) -> Atom;

    /// The window holding the manager selection.
    fn wm_window(&self) -> Window;

    /// The `_NET_WM_NAME` atom.
    fn net_wm_name(&self) -> Atom;
}
