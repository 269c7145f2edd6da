//! Monitor & Tag Interfaces
//!
//! Monitor geometry, stacking and layout live outside the dispatcher;
//! this is the surface the event handlers drive. Frame focus sits here
//! too because frames belong to the tag trees the monitors display.

use std::sync::mpsc::Receiver;

use crate::client::TagId;
use crate::commands::{CommandInput, OutputChannels};
use crate::geometry::Point;

/// Opaque handle to a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorId(pub u32);

/// Opaque handle to a node of a tag's tiling tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u32);

/// The monitor subsystem.
pub trait MonitorManager {
    /// Re-establish the global stacking order.
    fn restack(&mut self);

    /// The monitor currently showing `tag`, if any.
    fn by_tag(&self, tag: TagId) -> Option<MonitorId>;

    /// The monitor containing the root-relative `point`, if any.
    fn by_coordinate(&self, point: Point) -> Option<MonitorId>;

    /// The focused monitor.
    fn focused(&self) -> MonitorId;

    /// Root-relative origin of the monitor's content area (monitor
    /// rectangle origin plus reserved padding).
    fn content_origin(&self, monitor: MonitorId) -> Point;

    /// Re-apply the layout of the tag shown on `monitor`.
    fn apply_layout(&mut self, monitor: MonitorId);

    /// Focus the given frame.
    fn focus_frame(&mut self, frame: FrameId);

    /// Run monitor detection; returns the command's exit code.
    fn detect_monitors(&mut self, input: &CommandInput, channels: &mut OutputChannels) -> i32;

    /// Subscribe to requests to flush spurious EnterNotify events (the
    /// monitor subsystem raises one after operations that move windows
    /// under the pointer).
    fn connect_drop_enter_notify(&mut self) -> Receiver<()>;
}

/// Tag lookup needed by the startup scan's EWMH desktop import.
pub trait Tags {
    /// Name of the tag at `index`, if it exists.
    fn name_at(&self, index: usize) -> Option<String>;
}
