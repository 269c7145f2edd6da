//! Client Model Interface
//!
//! The dispatcher's view of the managed-client subsystem. Clients are
//! referred to through opaque ids; the client manager owns every record
//! and every mutation. A client window and its decoration window are
//! distinct X windows resolved through separate lookups (see
//! `crate::decoration`), never through shared references.

use std::sync::mpsc::Receiver;

use x11rb::protocol::xproto::Window;

use crate::commands::OutputChannels;
use crate::geometry::Rect;

/// Opaque handle to a managed client, keyed by its top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub Window);

/// Opaque handle to a tag (virtual workspace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagId(pub u32);

/// Overrides applied before the usual window rules when a client is
/// managed, used by the startup scan to restore tag assignments left
/// behind by the previous window manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOverride {
    pub tag_name: String,
}

/// The managed-client subsystem.
pub trait ClientManager {
    /// Resolve a top-level window to its client, if managed.
    fn client(&self, window: Window) -> Option<ClientId>;

    /// The currently focused client.
    fn focus(&self) -> Option<ClientId>;

    /// The client's top-level X window.
    fn window_of(&self, client: ClientId) -> Window;

    /// The tag the client lives on.
    fn tag_of(&self, client: ClientId) -> TagId;

    /// Start managing `window`.
    ///
    /// `visible` hints that the window is (or should become) viewable.
    /// With `brief` set the manager applies window rules and then
    /// immediately unmanages again; the caller never observes the
    /// transient client. `rules` is applied before the rule list.
    /// Returns `None` when the window vanished or a rule ignores it.
    fn manage_client(
        &mut self,
        window: Window,
        visible: bool,
        brief: bool,
        rules: Option<RuleOverride>,
    ) -> Option<ClientId>;

    /// Drop a client unconditionally (its window was destroyed).
    fn force_unmanage(&mut self, client: ClientId);

    /// The window reported an UnmapNotify; the manager decides from its
    /// own state machine whether this withdraws the client.
    fn unmap_notify(&mut self, window: Window);

    /// Focus `client`, or clear the focus for `None`. `raise` also
    /// restacks the client on top.
    fn focus_client(&mut self, client: Option<ClientId>, raise: bool);

    /// Re-run the window rules for an existing client.
    fn apply_rules(&mut self, client: ClientId, channels: &mut OutputChannels);

    /// ICCCM "Iconic -> Normal": the client asked to be un-minimized.
    fn clear_minimized(&mut self, client: ClientId);

    /// Re-read the window title.
    fn update_title(&mut self, client: ClientId);

    /// Re-read `WM_HINTS`.
    fn update_wm_hints(&mut self, client: ClientId);

    /// Re-read `WM_NORMAL_HINTS`.
    fn update_size_hints(&mut self, client: ClientId);

    /// Clamp the recorded floating geometry through the current size
    /// hints.
    fn clamp_floating_to_size_hints(&mut self, client: ClientId);

    /// Whether the client honors size hints while floating.
    fn uses_floating_size_hints(&self, client: ClientId) -> bool;

    /// Whether the client is currently floating (itself or via its tag).
    fn is_floating(&self, client: ClientId) -> bool;

    /// Whether the client is pseudotiled (floating size inside a tiled
    /// slot).
    fn is_pseudotiled(&self, client: ClientId) -> bool;

    /// The recorded floating geometry, monitor-relative.
    fn floating_geometry(&self, client: ClientId) -> Rect;

    /// The last geometry actually applied to the window.
    fn last_geometry(&self, client: ClientId) -> Rect;

    /// Record a new floating geometry without applying it.
    fn set_floating_geometry(&mut self, client: ClientId, rect: Rect);

    /// Apply the recorded floating geometry to the window.
    fn apply_floating_geometry(&mut self, client: ClientId);

    /// Send the client a synthetic ConfigureNotify restating its current
    /// geometry (ICCCM reply to a refused ConfigureRequest).
    fn send_configure_notify(&mut self, client: ClientId);

    /// True iff focusing this client would hide another window: the
    /// client sits in a tiled tag, its leaf uses the max layout, and it
    /// is not that leaf's focused client.
    fn concealed_by_max_layout(&self, client: ClientId) -> bool;

    /// Subscribe to changes of the dragged client (`Some` when a
    /// move/resize drag starts, `None` when it ends).
    fn connect_dragged(&mut self) -> Receiver<Option<ClientId>>;
}
