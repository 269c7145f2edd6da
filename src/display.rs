//! Display Connection
//!
//! The narrow interface the event loop owns for talking to the X server,
//! and its production implementation over an x11rb `RustConnection`.
//!
//! The dispatch model needs three queue primitives the raw protocol does
//! not offer: a sync that leaves every server-queued event readable
//! locally, a non-blocking read from that local queue, and removal of
//! the first queued event matching a selection mask (Xlib's
//! `XCheckMaskEvent`). `XDisplay` emulates them with a `VecDeque` fed
//! from `poll_for_event`.
//!
//! Requests that merely change server state are fire-and-forget: the
//! window an event named may be gone by the time the follow-up request
//! is issued, and that is an expected race, not an error. Failures are
//! logged at debug level and otherwise dropped.

use std::collections::{HashMap, VecDeque};
use std::os::unix::io::{AsRawFd, RawFd};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

use crate::events::matches_event_mask;

/// The window attributes the dispatcher inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAttributes {
    /// Whether the window is currently viewable (mapped, with mapped
    /// ancestors).
    pub viewable: bool,
    /// Whether the window asked to bypass window management.
    pub override_redirect: bool,
}

/// What the event loop needs from the display server.
pub trait DisplayConnection {
    /// The root window of the managed screen.
    fn root(&self) -> Window;

    /// File descriptor of the server socket, for readiness waits.
    fn raw_fd(&self) -> RawFd;

    /// Flush outgoing requests, force a server round-trip, and read all
    /// server-queued events into the local queue.
    fn sync(&mut self) -> Result<()>;

    /// Pop the next locally queued event, if any.
    fn next_event(&mut self) -> Option<Event>;

    /// Remove and return the first queued event selected by `mask`,
    /// leaving the rest of the queue in order.
    fn check_masked_event(&mut self, mask: EventMask) -> Option<Event>;

    /// Direct children of `window`, bottom-to-top.
    fn query_tree(&mut self, window: Window) -> Result<Vec<Window>>;

    /// Attributes of `window`; an error usually means it is gone.
    fn window_attributes(&mut self, window: Window) -> Result<WindowAttributes>;

    fn map_window(&mut self, window: Window);

    fn unmap_window(&mut self, window: Window);

    fn reparent_window(&mut self, window: Window, parent: Window, x: i16, y: i16);

    fn configure_window(&mut self, window: Window, values: &ConfigureWindowAux);

    /// Select `mask` on `window`, replacing our previous selection.
    fn select_input(&mut self, window: Window, mask: EventMask);

    fn set_input_focus(&mut self, window: Window);

    fn allow_events(&mut self, mode: Allow, time: Timestamp);

    /// Asynchronous pointer grab on `window` reporting `mask`, showing
    /// `cursor` while the grab lasts.
    fn grab_pointer(&mut self, window: Window, mask: EventMask, cursor: Cursor);

    fn ungrab_pointer(&mut self);

    /// A cursor for the given glyph of the standard cursor font.
    fn create_font_cursor(&mut self, shape: u16) -> Cursor;
}

/// Remove the first event in `queue` selected by `mask`, preserving the
/// order of everything else.
pub(crate) fn take_masked_event(queue: &mut VecDeque<Event>, mask: EventMask) -> Option<Event> {
    let index = queue.iter().position(|event| matches_event_mask(event, mask))?;
    queue.remove(index)
}

/// Production display connection over x11rb.
pub struct XDisplay {
    conn: RustConnection,
    root: Window,
    queue: VecDeque<Event>,
    cursor_font: Option<Font>,
    cursors: HashMap<u16, Cursor>,
}

impl XDisplay {
    /// Connect to the X server named by `display_name` (or `$DISPLAY`).
    pub fn connect(display_name: Option<&str>) -> Result<Self> {
        let (conn, screen_num) =
            RustConnection::connect(display_name).context("failed to connect to the X server")?;
        let root = conn.setup().roots[screen_num].root;
        Ok(Self {
            conn,
            root,
            queue: VecDeque::new(),
            cursor_font: None,
            cursors: HashMap::new(),
        })
    }

    /// Move every event the connection already holds into the local
    /// queue.
    fn pump(&mut self) {
        loop {
            match self.conn.poll_for_event() {
                Ok(Some(event)) => self.queue.push_back(event),
                Ok(None) => break,
                Err(err) => {
                    warn!("reading events failed: {}", err);
                    break;
                }
            }
        }
    }

    fn cursor_font(&mut self) -> Result<Font> {
        if let Some(font) = self.cursor_font {
            return Ok(font);
        }
        let font = self.conn.generate_id()?;
        self.conn.open_font(font, b"cursor")?;
        self.cursor_font = Some(font);
        Ok(font)
    }
}

impl DisplayConnection for XDisplay {
    fn root(&self) -> Window {
        self.root
    }

    fn raw_fd(&self) -> RawFd {
        self.conn.stream().as_raw_fd()
    }

    fn sync(&mut self) -> Result<()> {
        self.conn.flush().context("flushing the X connection failed")?;
        // Any round-trip forces the server to deliver what it has; the
        // classic choice is GetInputFocus.
        let cookie = self
            .conn
            .get_input_focus()
            .context("X server round-trip failed")?;
        cookie.reply().context("X server round-trip failed")?;
        self.pump();
        Ok(())
    }

    fn next_event(&mut self) -> Option<Event> {
        self.pump();
        self.queue.pop_front()
    }

    fn check_masked_event(&mut self, mask: EventMask) -> Option<Event> {
        self.pump();
        take_masked_event(&mut self.queue, mask)
    }

    fn query_tree(&mut self, window: Window) -> Result<Vec<Window>> {
        Ok(self
            .conn
            .query_tree(window)
            .context("QueryTree request failed")?
            .reply()
            .context("QueryTree reply failed")?
            .children)
    }

    fn window_attributes(&mut self, window: Window) -> Result<WindowAttributes> {
        let reply = self
            .conn
            .get_window_attributes(window)
            .context("GetWindowAttributes request failed")?
            .reply()
            .context("GetWindowAttributes reply failed")?;
        Ok(WindowAttributes {
            viewable: reply.map_state == MapState::VIEWABLE,
            override_redirect: reply.override_redirect,
        })
    }

    fn map_window(&mut self, window: Window) {
        if let Err(err) = self.conn.map_window(window) {
            debug!("MapWindow 0x{:x} failed: {}", window, err);
        }
    }

    fn unmap_window(&mut self, window: Window) {
        if let Err(err) = self.conn.unmap_window(window) {
            debug!("UnmapWindow 0x{:x} failed: {}", window, err);
        }
    }

    fn reparent_window(&mut self, window: Window, parent: Window, x: i16, y: i16) {
        if let Err(err) = self.conn.reparent_window(window, parent, x, y) {
            debug!("ReparentWindow 0x{:x} failed: {}", window, err);
        }
    }

    fn configure_window(&mut self, window: Window, values: &ConfigureWindowAux) {
        if let Err(err) = self.conn.configure_window(window, values) {
            debug!("ConfigureWindow 0x{:x} failed: {}", window, err);
        }
    }

    fn select_input(&mut self, window: Window, mask: EventMask) {
        let values = ChangeWindowAttributesAux::new().event_mask(mask);
        if let Err(err) = self.conn.change_window_attributes(window, &values) {
            debug!("SelectInput on 0x{:x} failed: {}", window, err);
        }
    }

    fn set_input_focus(&mut self, window: Window) {
        if let Err(err) =
            self.conn
                .set_input_focus(InputFocus::POINTER_ROOT, window, x11rb::CURRENT_TIME)
        {
            debug!("SetInputFocus 0x{:x} failed: {}", window, err);
        }
    }

    fn allow_events(&mut self, mode: Allow, time: Timestamp) {
        if let Err(err) = self.conn.allow_events(mode, time) {
            debug!("AllowEvents failed: {}", err);
        }
    }

    fn grab_pointer(&mut self, window: Window, mask: EventMask, cursor: Cursor) {
        let result = self.conn.grab_pointer(
            true,
            window,
            mask,
            GrabMode::ASYNC,
            GrabMode::ASYNC,
            x11rb::NONE,
            cursor,
            x11rb::CURRENT_TIME,
        );
        if let Err(err) = result {
            debug!("GrabPointer on 0x{:x} failed: {}", window, err);
        }
    }

    fn ungrab_pointer(&mut self) {
        if let Err(err) = self.conn.ungrab_pointer(x11rb::CURRENT_TIME) {
            debug!("UngrabPointer failed: {}", err);
        }
    }

    fn create_font_cursor(&mut self, shape: u16) -> Cursor {
        if let Some(&cursor) = self.cursors.get(&shape) {
            return cursor;
        }
        let created = (|| -> Result<Cursor> {
            let font = self.cursor_font()?;
            let cursor = self.conn.generate_id()?;
            // Glyph pairs of the cursor font: the mask glyph follows the
            // shape glyph.
            self.conn.create_glyph_cursor(
                cursor,
                font,
                font,
                shape,
                shape + 1,
                0,
                0,
                0,
                0xffff,
                0xffff,
                0xffff,
            )?;
            Ok(cursor)
        })();
        match created {
            Ok(cursor) => {
                self.cursors.insert(shape, cursor);
                cursor
            }
            Err(err) => {
                warn!("creating cursor glyph {} failed: {}", shape, err);
                x11rb::NONE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(window: Window) -> Event {
        Event::EnterNotify(EnterNotifyEvent {
            response_type: ENTER_NOTIFY_EVENT,
            detail: NotifyDetail::ANCESTOR,
            sequence: 0,
            time: 0,
            root: 1,
            event: window,
            child: 0,
            root_x: 0,
            root_y: 0,
            event_x: 0,
            event_y: 0,
            state: 0u16.into(),
            mode: NotifyMode::NORMAL,
            same_screen_focus: 0,
        })
    }

    fn focus_in(window: Window) -> Event {
        Event::FocusIn(FocusInEvent {
            response_type: FOCUS_IN_EVENT,
            detail: NotifyDetail::NONLINEAR,
            sequence: 0,
            event: window,
            mode: NotifyMode::NORMAL,
        })
    }

    #[test]
    fn masked_take_removes_first_match_and_keeps_order() {
        let mut queue: VecDeque<Event> =
            [focus_in(1), enter(2), focus_in(3), enter(4)].into_iter().collect();

        let taken = take_masked_event(&mut queue, EventMask::ENTER_WINDOW).unwrap();
        match taken {
            Event::EnterNotify(e) => assert_eq!(e.event, 2),
            other => panic!("unexpected event: {:?}", other),
        }

        // The two focus events and the remaining enter keep their order.
        let remaining: Vec<u32> = queue
            .iter()
            .map(|event| match event {
                Event::FocusIn(e) => e.event,
                Event::EnterNotify(e) => e.event,
                other => panic!("unexpected event: {:?}", other),
            })
            .collect();
        assert_eq!(remaining, vec![1, 3, 4]);
    }

    #[test]
    fn masked_take_returns_none_without_match() {
        let mut queue: VecDeque<Event> = [focus_in(1)].into_iter().collect();
        assert!(take_masked_event(&mut queue, EventMask::ENTER_WINDOW).is_none());
        assert_eq!(queue.len(), 1);
    }
}
