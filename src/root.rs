//! Collaborator Aggregate
//!
//! Everything the event dispatcher drives, gathered in one place. The
//! embedding process builds a `Root` from its concrete subsystems and
//! lends it to the main loop; the dispatcher reaches every collaborator
//! through it and never holds a second path to any of them.

use crate::client::ClientManager;
use crate::commands::CommandRunner;
use crate::decoration::{Decorations, FrameDecorations};
use crate::ewmh::Ewmh;
use crate::input::{KeyManager, MouseManager};
use crate::ipc::IpcServer;
use crate::monitor::{MonitorManager, Tags};
use crate::panel::{DesktopWindows, PanelManager};
use crate::settings::Settings;

/// Observers of externally-visible state, scanned after every handled
/// event so derived state lags by at most one handler.
pub trait Watchers {
    fn scan_for_changes(&mut self);
}

/// The window manager's object tree, as seen from the event loop.
pub struct Root {
    pub clients: Box<dyn ClientManager>,
    pub monitors: Box<dyn MonitorManager>,
    pub tags: Box<dyn Tags>,
    pub panels: Box<dyn PanelManager>,
    pub desktops: Box<dyn DesktopWindows>,
    pub keys: Box<dyn KeyManager>,
    pub mouse: Box<dyn MouseManager>,
    pub ewmh: Box<dyn Ewmh>,
    pub decorations: Box<dyn Decorations>,
    pub frame_decorations: Box<dyn FrameDecorations>,
    pub ipc: Box<dyn IpcServer>,
    pub commands: Box<dyn CommandRunner>,
    pub watchers: Box<dyn Watchers>,
    pub settings: Settings,
}
