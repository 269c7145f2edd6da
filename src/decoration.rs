//! Decoration Interfaces
//!
//! A decoration window frames a client window; the two are distinct X
//! windows that must stay mutually resolvable without shared references.
//! Frame decorations are the visible bodies of empty tiling-tree leaves
//! and resolve to frames instead of clients.

use x11rb::protocol::xproto::Window;

use crate::client::ClientId;
use crate::geometry::Point;
use crate::input::ResizeAction;
use crate::monitor::FrameId;

/// Client-decoration lookups and hit tests. Positions are relative to
/// the decoration window that reported the event.
pub trait Decorations {
    /// Resolve a decoration window to the client it frames.
    fn client_of(&self, window: Window) -> Option<ClientId>;

    /// The decoration window framing `client`, if it has one.
    fn decoration_window(&self, client: ClientId) -> Option<Window>;

    /// The client of the tab button under `position`, if the decoration
    /// shows tabs and one is hit.
    fn tab_button_at(&self, client: ClientId, position: Point) -> Option<ClientId>;

    /// The resize edges triggered by a press at `position` (border and
    /// corner areas), empty-none when the position is in the move area.
    fn resize_edge_at(&self, client: ClientId, position: Point) -> Option<ResizeAction>;

    /// Refresh the per-area cursors of the client's decoration.
    fn update_resize_area_cursors(&mut self, client: ClientId);
}

/// Frame-decoration lookup.
pub trait FrameDecorations {
    /// Resolve a frame-decoration window to its frame.
    fn frame_at(&self, window: Window) -> Option<FrameId>;
}
