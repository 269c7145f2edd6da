//! Keyboard & Mouse Interfaces
//!
//! Key bindings and mouse drags are owned by their managers; the
//! dispatcher forwards events and, for decoration clicks, initiates
//! moves and resizes. `ResizeAction` describes which window edges a
//! drag adjusts.

use bitflags::bitflags;
use x11rb::protocol::xproto::{KeyButMask, KeyPressEvent, Window};

use crate::client::ClientId;
use crate::geometry::Point;

/// Cursor-font glyphs used for drag cursors.
///
/// Glyph indices of the standard X11 `cursor` font.
pub mod cursor_font {
    pub const BOTTOM_LEFT_CORNER: u16 = 12;
    pub const BOTTOM_RIGHT_CORNER: u16 = 14;
    pub const BOTTOM_SIDE: u16 = 16;
    pub const FLEUR: u16 = 52;
    pub const LEFT_SIDE: u16 = 70;
    pub const RIGHT_SIDE: u16 = 96;
    pub const TOP_LEFT_CORNER: u16 = 134;
    pub const TOP_RIGHT_CORNER: u16 = 136;
    pub const TOP_SIDE: u16 = 138;
}

bitflags! {
    /// The set of window edges affected by a resize drag. Adjacent
    /// edges combine into corners; the empty set means a plain move.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ResizeAction: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const TOP = 1 << 2;
        const BOTTOM = 1 << 3;
    }
}

impl ResizeAction {
    /// The cursor-font glyph matching this edge set, or `None` for
    /// combinations that have no dedicated cursor (including the empty
    /// set).
    pub fn cursor_shape(self) -> Option<u16> {
        match (
            self.contains(Self::LEFT),
            self.contains(Self::RIGHT),
            self.contains(Self::TOP),
            self.contains(Self::BOTTOM),
        ) {
            (true, false, true, false) => Some(cursor_font::TOP_LEFT_CORNER),
            (false, true, true, false) => Some(cursor_font::TOP_RIGHT_CORNER),
            (true, false, false, true) => Some(cursor_font::BOTTOM_LEFT_CORNER),
            (false, true, false, true) => Some(cursor_font::BOTTOM_RIGHT_CORNER),
            (true, false, false, false) => Some(cursor_font::LEFT_SIDE),
            (false, true, false, false) => Some(cursor_font::RIGHT_SIDE),
            (false, false, true, false) => Some(cursor_font::TOP_SIDE),
            (false, false, false, true) => Some(cursor_font::BOTTOM_SIDE),
            _ => None,
        }
    }
}

/// The key-binding manager.
pub trait KeyManager {
    /// A grabbed key was pressed.
    fn handle_key_press(&mut self, event: &KeyPressEvent);

    /// The server's keyboard mapping changed; refresh the keycode cache
    /// for the given range.
    fn refresh_keymap(&mut self, first_keycode: u8, count: u8);

    /// Re-grab every key binding (after a keyboard mapping change).
    fn regrab_all(&mut self);
}

/// The mouse-binding and drag manager.
pub trait MouseManager {
    /// Offer a button press to the mouse bindings. Returns true when the
    /// binding consumed the event.
    fn handle_event(&mut self, modifiers: KeyButMask, button: u8, window: Window) -> bool;

    /// Feed the newest pointer position into an active drag.
    fn handle_motion_event(&mut self, point: Point);

    /// Abort any drag in progress.
    fn stop_drag(&mut self);

    /// Start a move drag of `client`.
    fn initiate_move(&mut self, client: ClientId);

    /// Start a resize drag of `client` along `edge`.
    fn initiate_resize(&mut self, client: ClientId, edge: ResizeAction);

    /// Whether a drag is in progress.
    fn is_dragging(&self) -> bool;

    /// The edge set of the current drag (empty for a move).
    fn resize_action(&self) -> ResizeAction;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_side_cursors() {
        assert_eq!(
            (ResizeAction::TOP | ResizeAction::LEFT).cursor_shape(),
            Some(cursor_font::TOP_LEFT_CORNER)
        );
        assert_eq!(
            (ResizeAction::BOTTOM | ResizeAction::RIGHT).cursor_shape(),
            Some(cursor_font::BOTTOM_RIGHT_CORNER)
        );
        assert_eq!(
            ResizeAction::RIGHT.cursor_shape(),
            Some(cursor_font::RIGHT_SIDE)
        );
    }

    #[test]
    fn move_and_degenerate_edge_sets_have_no_cursor() {
        assert_eq!(ResizeAction::empty().cursor_shape(), None);
        assert_eq!(
            (ResizeAction::LEFT | ResizeAction::RIGHT).cursor_shape(),
            None
        );
        assert_eq!(ResizeAction::all().cursor_shape(), None);
    }
}
