//! trellis-wm
//!
//! The X11 event loop and window-management dispatcher of the trellis
//! tiling window manager. This crate owns the main loop: it waits on
//! the display connection, reaps exited children, routes every X event
//! through a fixed handler table, scans pre-existing windows at
//! startup, and coordinates the pointer grab for mouse drags.
//!
//! Everything with policy — the client model, rules, tiling trees,
//! monitors, panels, decorations, EWMH properties, key and mouse
//! bindings, the command interpreter — lives in the embedding process
//! behind the trait interfaces collected in [`root::Root`]. The loop
//! borrows the display connection and the collaborator tree, pumps
//! events until it is replaced or told to quit, and emits a
//! notification for every reaped child.
//!
//! ```no_run
//! # fn collaborators() -> trellis_wm::Root { unimplemented!() }
//! use trellis_wm::{MainLoop, XDisplay};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut display = XDisplay::connect(None)?;
//! let mut root = collaborators();
//! let mut wm = MainLoop::new(&mut display, &mut root);
//! wm.scan_existing_clients();
//! wm.run()
//! # }
//! ```

pub mod client;
pub mod commands;
pub mod decoration;
pub mod display;
pub mod events;
pub mod ewmh;
pub mod geometry;
pub mod input;
pub mod ipc;
pub mod main_loop;
pub mod monitor;
pub mod panel;
pub mod root;
pub mod settings;
pub mod signal;

pub use client::{ClientId, ClientManager, RuleOverride, TagId};
pub use commands::{CommandInput, CommandRunner, OutputChannels};
pub use decoration::{Decorations, FrameDecorations};
pub use display::{DisplayConnection, WindowAttributes, XDisplay};
pub use ewmh::{Ewmh, WindowType};
pub use geometry::{Point, Rect};
pub use input::{KeyManager, MouseManager, ResizeAction};
pub use ipc::{CallResult, IpcServer};
pub use main_loop::{ChildExit, MainLoop};
pub use monitor::{FrameId, MonitorId, MonitorManager, Tags};
pub use panel::{DesktopWindows, PanelManager};
pub use root::{Root, Watchers};
pub use settings::Settings;
pub use signal::Signal;
