//! Runtime Settings
//!
//! The subset of window-manager settings the event dispatcher consults.
//! The embedding process owns loading and live reconfiguration; the
//! dispatcher only ever reads the current values through `Root`.

use serde::{Deserialize, Serialize};

/// Settings read by the event handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Raise a client when a button press focuses it.
    pub raise_on_click: bool,

    /// Focus the client under the pointer on EnterNotify.
    pub focus_follows_mouse: bool,

    /// Re-run monitor detection when the root window geometry changes.
    pub auto_detect_monitors: bool,

    /// During the startup scan, assign pre-existing windows to the tag
    /// recorded in their `_NET_WM_DESKTOP` property.
    pub import_tags_from_ewmh: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            raise_on_click: true,
            focus_follows_mouse: true,
            auto_detect_monitors: false,
            import_tags_from_ewmh: true,
        }
    }
}
