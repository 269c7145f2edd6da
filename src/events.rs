//! Event Classification Helpers
//!
//! The dispatcher's handler table is indexed by the X11 event-type code;
//! these helpers extract the code, the synthetic (SendEvent) bit, and
//! decide which selection mask a queued event belongs to — the piece of
//! Xlib's `XCheckMaskEvent` that the protocol itself does not provide.

use x11rb::protocol::xproto::EventMask;
use x11rb::protocol::Event;

/// One past the highest core event code; the size of the handler table.
pub const LAST_EVENT: usize = 36;

/// The core event code, with the SendEvent bit stripped.
pub fn event_code(event: &Event) -> u8 {
    event.response_type() & 0x7f
}

/// Whether the event was produced by `SendEvent` (the high bit of the
/// wire response type).
pub fn is_synthetic(response_type: u8) -> bool {
    response_type & 0x80 != 0
}

/// Whether `event` would be selected by `mask`.
///
/// Covers the selection masks the dispatcher drains with: crossing,
/// focus, motion, plus the input and property masks for completeness.
/// Structure-class events report under both the window's and the
/// parent's selection and match either mask here.
pub fn matches_event_mask(event: &Event, mask: EventMask) -> bool {
    let selected = |wanted: EventMask| u32::from(mask & wanted) != 0;
    match event {
        Event::KeyPress(_) => selected(EventMask::KEY_PRESS),
        Event::KeyRelease(_) => selected(EventMask::KEY_RELEASE),
        Event::ButtonPress(_) => selected(EventMask::BUTTON_PRESS),
        Event::ButtonRelease(_) => selected(EventMask::BUTTON_RELEASE),
        Event::MotionNotify(_) => {
            selected(EventMask::POINTER_MOTION | EventMask::BUTTON_MOTION)
        }
        Event::EnterNotify(_) => selected(EventMask::ENTER_WINDOW),
        Event::LeaveNotify(_) => selected(EventMask::LEAVE_WINDOW),
        Event::FocusIn(_) | Event::FocusOut(_) => selected(EventMask::FOCUS_CHANGE),
        Event::Expose(_) => selected(EventMask::EXPOSURE),
        Event::PropertyNotify(_) => selected(EventMask::PROPERTY_CHANGE),
        Event::CirculateNotify(_)
        | Event::ConfigureNotify(_)
        | Event::CreateNotify(_)
        | Event::DestroyNotify(_)
        | Event::GravityNotify(_)
        | Event::MapNotify(_)
        | Event::ReparentNotify(_)
        | Event::UnmapNotify(_) => {
            selected(EventMask::STRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_NOTIFY)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x11rb::protocol::xproto::{
        EnterNotifyEvent, Motion, MotionNotifyEvent, NotifyDetail, NotifyMode, UnmapNotifyEvent,
        ENTER_NOTIFY_EVENT, MOTION_NOTIFY_EVENT, UNMAP_NOTIFY_EVENT,
    };

    fn enter_event() -> Event {
        Event::EnterNotify(EnterNotifyEvent {
            response_type: ENTER_NOTIFY_EVENT,
            detail: NotifyDetail::ANCESTOR,
            sequence: 0,
            time: 0,
            root: 1,
            event: 42,
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

    #[test]
    fn code_strips_the_synthetic_bit() {
        let event = Event::UnmapNotify(UnmapNotifyEvent {
            response_type: UNMAP_NOTIFY_EVENT | 0x80,
            sequence: 0,
            event: 42,
            window: 42,
            from_configure: false,
        });
        assert_eq!(event_code(&event), UNMAP_NOTIFY_EVENT);
        assert!(is_synthetic(UNMAP_NOTIFY_EVENT | 0x80));
        assert!(!is_synthetic(UNMAP_NOTIFY_EVENT));
    }

    #[test]
    fn crossing_events_match_the_enter_mask_only() {
        let event = enter_event();
        assert!(matches_event_mask(&event, EventMask::ENTER_WINDOW));
        assert!(!matches_event_mask(&event, EventMask::LEAVE_WINDOW));
        assert!(!matches_event_mask(&event, EventMask::FOCUS_CHANGE));
    }

    #[test]
    fn motion_matches_both_motion_masks() {
        let event = Event::MotionNotify(MotionNotifyEvent {
            response_type: MOTION_NOTIFY_EVENT,
            detail: Motion::NORMAL,
            sequence: 0,
            time: 0,
            root: 1,
            event: 42,
            child: 0,
            root_x: 10,
            root_y: 20,
            event_x: 10,
            event_y: 20,
            state: 0u16.into(),
            same_screen: true,
        });
        assert!(matches_event_mask(&event, EventMask::BUTTON_MOTION));
        assert!(matches_event_mask(&event, EventMask::POINTER_MOTION));
        assert!(!matches_event_mask(&event, EventMask::ENTER_WINDOW));
    }
}
