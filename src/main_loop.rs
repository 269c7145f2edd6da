//! Main Event Loop
//!
//! The single-threaded dispatcher at the center of the window manager:
//! it blocks on the display connection, reaps exited children at every
//! wakeup, drains the event queue through a fixed handler table, and
//! coordinates the pointer grab for mouse drags. Handlers run to
//! completion and never block; everything they touch is reached through
//! the collaborator interfaces in `Root`.

use std::os::fd::BorrowedFd;
use std::sync::mpsc::Receiver;

use anyhow::{Context, Result};
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal as UnixSignal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tracing::{debug, info, warn};
use x11rb::protocol::xproto::*;
use x11rb::protocol::Event;

use crate::client::{ClientId, RuleOverride};
use crate::commands::{CommandInput, OutputChannels};
use crate::display::DisplayConnection;
use crate::events::{event_code, is_synthetic, LAST_EVENT};
use crate::ewmh::WindowType;
use crate::geometry::{Point, Rect};
use crate::input::cursor_font;
use crate::ipc::call_command;
use crate::root::Root;
use crate::signal::Signal;

const PRIMARY_BUTTON: u8 = 1;

/// A child process exited. Children killed by a signal report
/// `128 + signal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    pub pid: i32,
    pub status: i32,
}

type Handler<'wm, X> = fn(&mut MainLoop<'wm, X>, &Event);

/// The event dispatcher.
///
/// Owns the display connection and the collaborator tree for the
/// duration of the loop; both are borrowed from the embedding process.
pub struct MainLoop<'wm, X: DisplayConnection> {
    x: &'wm mut X,
    root: &'wm mut Root,
    about_to_quit: bool,
    during_enter_notify: bool,
    handler_table: [Option<Handler<'wm, X>>; LAST_EVENT],
    dragged_changes: Receiver<Option<ClientId>>,
    enter_drain_requests: Receiver<()>,
    /// Emitted once per reaped child process.
    pub child_exited: Signal<ChildExit>,
}

extern "C" fn sigchld_noop(_: nix::libc::c_int) {}

/// Install a no-op `SIGCHLD` handler without `SA_RESTART`, so a dying
/// child interrupts the display wait and the reaper runs promptly.
fn install_sigchld_handler() {
    let action = SigAction::new(
        SigHandler::Handler(sigchld_noop),
        SaFlags::empty(),
        SigSet::empty(),
    );
    if let Err(err) = unsafe { sigaction(UnixSignal::SIGCHLD, &action) } {
        warn!("installing the SIGCHLD handler failed: {}", err);
    }
}

impl<'wm, X: DisplayConnection> MainLoop<'wm, X> {
    pub fn new(x: &'wm mut X, root: &'wm mut Root) -> Self {
        install_sigchld_handler();
        let dragged_changes = root.clients.connect_dragged();
        let enter_drain_requests = root.monitors.connect_drop_enter_notify();

        let mut handler_table: [Option<Handler<'wm, X>>; LAST_EVENT] = [None; LAST_EVENT];
        handler_table[BUTTON_PRESS_EVENT as usize] = Some(Self::button_press);
        handler_table[BUTTON_RELEASE_EVENT as usize] = Some(Self::button_release);
        handler_table[CLIENT_MESSAGE_EVENT as usize] = Some(Self::client_message);
        handler_table[CONFIGURE_NOTIFY_EVENT as usize] = Some(Self::configure_notify);
        handler_table[CONFIGURE_REQUEST_EVENT as usize] = Some(Self::configure_request);
        handler_table[CREATE_NOTIFY_EVENT as usize] = Some(Self::create_notify);
        handler_table[DESTROY_NOTIFY_EVENT as usize] = Some(Self::destroy_notify);
        handler_table[ENTER_NOTIFY_EVENT as usize] = Some(Self::enter_notify);
        handler_table[EXPOSE_EVENT as usize] = Some(Self::expose);
        handler_table[FOCUS_IN_EVENT as usize] = Some(Self::focus_in);
        handler_table[KEY_PRESS_EVENT as usize] = Some(Self::key_press);
        handler_table[MAP_NOTIFY_EVENT as usize] = Some(Self::map_notify);
        handler_table[MAP_REQUEST_EVENT as usize] = Some(Self::map_request);
        handler_table[MAPPING_NOTIFY_EVENT as usize] = Some(Self::mapping_notify);
        handler_table[MOTION_NOTIFY_EVENT as usize] = Some(Self::motion_notify);
        handler_table[PROPERTY_NOTIFY_EVENT as usize] = Some(Self::property_notify);
        handler_table[SELECTION_CLEAR_EVENT as usize] = Some(Self::selection_clear);
        handler_table[UNMAP_NOTIFY_EVENT as usize] = Some(Self::unmap_notify);

        Self {
            x,
            root,
            about_to_quit: false,
            during_enter_notify: false,
            handler_table,
            dragged_changes,
            enter_drain_requests,
            child_exited: Signal::new(),
        }
    }

    /// Ask the loop to exit at the next safe point.
    pub fn quit(&mut self) {
        self.about_to_quit = true;
    }

    pub fn about_to_quit(&self) -> bool {
        self.about_to_quit
    }

    /// Pump events until `quit` is requested.
    pub fn run(&mut self) -> Result<()> {
        while !self.about_to_quit {
            // Collect zombies before hanging in the wait, and again
            // right after it: the wakeup may have been SIGCHLD.
            self.collect_zombies();
            self.wait_for_display()?;
            self.collect_zombies();
            self.apply_notifications();
            if self.about_to_quit {
                break;
            }
            self.x
                .sync()
                .context("synchronizing with the X server failed")?;
            self.drain_events()?;
        }
        Ok(())
    }

    /// Block until the display connection is readable or a signal
    /// interrupts the wait.
    fn wait_for_display(&mut self) -> Result<()> {
        let fd = unsafe { BorrowedFd::borrow_raw(self.x.raw_fd()) };
        let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];
        match poll(&mut fds, PollTimeout::NONE) {
            Ok(_) | Err(Errno::EINTR) => Ok(()),
            Err(err) => Err(err).context("waiting for the display connection failed"),
        }
    }

    /// Dispatch every queued event, re-syncing after each handler so
    /// follow-up events produced by the handlers are processed in the
    /// same burst.
    fn drain_events(&mut self) -> Result<()> {
        while !self.about_to_quit {
            let Some(event) = self.x.next_event() else {
                break;
            };
            self.dispatch(&event);
            self.apply_notifications();
            self.root.watchers.scan_for_changes();
            self.x
                .sync()
                .context("synchronizing with the X server failed")?;
        }
        Ok(())
    }

    /// Route one event through the handler table. Event types without a
    /// registered handler are dropped.
    fn dispatch(&mut self, event: &Event) {
        let code = event_code(event) as usize;
        if let Some(handler) = self.handler_table.get(code).copied().flatten() {
            handler(self, event);
        }
    }

    /// Reap exited children without blocking, emitting one notification
    /// per child.
    fn collect_zombies(&mut self) {
        loop {
            match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::Exited(pid, status)) => self.child_exited.emit(ChildExit {
                    pid: pid.as_raw(),
                    status,
                }),
                Ok(WaitStatus::Signaled(pid, signal, _)) => self.child_exited.emit(ChildExit {
                    pid: pid.as_raw(),
                    status: 128 + signal as i32,
                }),
                Ok(WaitStatus::StillAlive) => break,
                // Stopped or traced children are not zombies.
                Ok(_) => continue,
                // ECHILD: nothing left to wait for.
                Err(_) => break,
            }
        }
    }

    /// Apply queued collaborator notifications (drag changes, requests
    /// to flush crossing events). Runs on the dispatcher thread at safe
    /// points: after each handler and at every wakeup.
    fn apply_notifications(&mut self) {
        while let Ok(dragged) = self.dragged_changes.try_recv() {
            self.dragged_client_changed(dragged);
        }
        while self.enter_drain_requests.try_recv().is_ok() {
            self.drop_enter_notify_events();
        }
    }

    /// The mouse subsystem started or stopped dragging a client.
    fn dragged_client_changed(&mut self, dragged: Option<ClientId>) {
        match dragged {
            Some(client) => {
                let shape = self
                    .root
                    .mouse
                    .resize_action()
                    .cursor_shape()
                    .unwrap_or(cursor_font::FLEUR);
                let cursor = self.x.create_font_cursor(shape);
                let window = self.root.clients.window_of(client);
                self.x.grab_pointer(
                    window,
                    EventMask::POINTER_MOTION | EventMask::BUTTON_RELEASE,
                    cursor,
                );
            }
            None => {
                self.x.ungrab_pointer();
                // The ungrab generates crossings for whatever is under
                // the pointer now; they must not move the focus.
                self.sync_quietly();
                while self.x.check_masked_event(EventMask::ENTER_WINDOW).is_some() {}
            }
        }
    }

    /// Flush pending EnterNotify events from the queue.
    ///
    /// No-op while a real EnterNotify handler is on the stack: fast
    /// pointer movement produces legitimate successive enters that must
    /// not be discarded.
    pub fn drop_enter_notify_events(&mut self) {
        if self.during_enter_notify {
            return;
        }
        self.sync_quietly();
        while self.x.check_masked_event(EventMask::ENTER_WINDOW).is_some() {}
    }

    fn sync_quietly(&mut self) {
        if let Err(err) = self.x.sync() {
            warn!("X sync failed: {}", err);
        }
    }

    /// Adopt the top-level windows that already exist, classifying each
    /// as desktop window, panel, or client. Runs once, before `run`.
    pub fn scan_existing_clients(&mut self) {
        let root_window = self.x.root();
        let windows = match self.x.query_tree(root_window) {
            Ok(windows) => windows,
            Err(err) => {
                warn!("scanning the window tree failed: {}", err);
                return;
            }
        };
        let original_clients = self.root.ewmh.original_client_list();
        for window in windows {
            let Ok(attributes) = self.x.window_attributes(window) else {
                continue;
            };
            if attributes.override_redirect || self.root.ewmh.is_own_window(window) {
                continue;
            }
            match self.root.ewmh.window_type(window) {
                WindowType::Desktop => {
                    self.root.desktops.register(window);
                    self.root.monitors.restack();
                    self.x.map_window(window);
                }
                WindowType::Dock => {
                    self.root.panels.register_panel(window);
                    self.x.select_input(window, EventMask::PROPERTY_CHANGE);
                    self.x.map_window(window);
                }
                WindowType::Other => {
                    // Manage only what is visible, plus whatever the
                    // previous window manager listed as a client.
                    if attributes.viewable || original_clients.contains(&window) {
                        let rules = self.initial_tag_rule(window);
                        if let Some(client) =
                            self.root.clients.manage_client(window, true, false, rules)
                        {
                            let tag = self.root.clients.tag_of(client);
                            if self.root.monitors.by_tag(tag).is_some() {
                                self.x.map_window(window);
                            }
                        }
                    }
                }
            }
        }
        // Clients the previous window manager had unmapped (hidden
        // workspaces) are not viewable and may have been reparented;
        // bring every listed survivor back under management.
        for window in original_clients {
            if self.root.clients.client(window).is_some() {
                continue;
            }
            let Ok(attributes) = self.x.window_attributes(window) else {
                continue;
            };
            if attributes.override_redirect {
                continue;
            }
            self.x.reparent_window(window, root_window, 0, 0);
            let rules = self.initial_tag_rule(window);
            self.root.clients.manage_client(window, true, false, rules);
        }
        self.root.monitors.restack();
    }

    /// The tag override for a scanned window, from its `_NET_WM_DESKTOP`
    /// property, when tag import is enabled.
    fn initial_tag_rule(&mut self, window: Window) -> Option<RuleOverride> {
        if !self.root.settings.import_tags_from_ewmh {
            return None;
        }
        let index = self.root.ewmh.initial_desktop(window)?;
        let tag_name = self.root.tags.name_at(index)?;
        Some(RuleOverride { tag_name })
    }

    /// Service one IPC connection window through the command
    /// interpreter.
    fn service_ipc_connection(&mut self, window: Window) {
        let Root { ipc, commands, .. } = &mut *self.root;
        ipc.handle_connection(window, &mut |call| call_command(commands.as_mut(), call));
    }

    /* ----------------------------- */
    /* event handler implementations */
    /* ----------------------------- */

    fn button_press(&mut self, event: &Event) {
        let Event::ButtonPress(press) = event else {
            return;
        };
        debug!(
            "ButtonPress {} on window 0x{:x}",
            press.detail, press.event
        );
        if !self
            .root
            .mouse
            .handle_event(press.state, press.detail, press.event)
        {
            // No mouse binding consumed it; treat it as a click on the
            // client or its decoration.
            let client = self
                .root
                .clients
                .client(press.event)
                .or_else(|| self.root.decorations.client_of(press.event));
            if let Some(client) = client {
                let position = Point::new(press.event_x.into(), press.event_y.into());
                let on_decoration =
                    self.root.decorations.decoration_window(client) == Some(press.event);
                let tab_client = if on_decoration && press.detail == PRIMARY_BUTTON {
                    self.root.decorations.tab_button_at(client, position)
                } else {
                    None
                };
                let raise = self.root.settings.raise_on_click;
                if let Some(tab_client) = tab_client {
                    self.root.clients.focus_client(Some(tab_client), raise);
                } else {
                    self.root.clients.focus_client(Some(client), raise);
                    if on_decoration {
                        match self.root.decorations.resize_edge_at(client, position) {
                            Some(edge) => self.root.mouse.initiate_resize(client, edge),
                            None => self.root.mouse.initiate_move(client),
                        }
                    }
                }
            }
        }
        if let Some(frame) = self.root.frame_decorations.frame_at(press.event) {
            self.root.monitors.focus_frame(frame);
        }
        // Replay the press so the grab does not swallow the click from
        // the client.
        self.x.allow_events(Allow::REPLAY_POINTER, press.time);
    }

    fn button_release(&mut self, event: &Event) {
        let Event::ButtonRelease(_) = event else {
            return;
        };
        self.root.mouse.stop_drag();
    }

    fn client_message(&mut self, event: &Event) {
        let Event::ClientMessage(message) = event else {
            return;
        };
        self.root.ewmh.handle_client_message(message);
    }

    fn configure_request(&mut self, event: &Event) {
        let Event::ConfigureRequest(request) = event else {
            return;
        };
        debug!("ConfigureRequest for 0x{:x}", request.window);
        match self.root.clients.client(request.window) {
            Some(client) => self.configure_request_managed(client, request),
            None => {
                // Probably a bar or similar unmanaged helper window;
                // forward the request verbatim.
                let values = ConfigureWindowAux::from_configure_request(request);
                self.x.configure_window(request.window, &values);
            }
        }
    }

    fn configure_request_managed(&mut self, client: ClientId, request: &ConfigureRequestEvent) {
        let mut new_rect = self.root.clients.floating_geometry(client);
        let mut changed = false;
        if self.root.clients.uses_floating_size_hints(client)
            && (self.root.clients.is_floating(client) || self.root.clients.is_pseudotiled(client))
        {
            let width_requested = request.value_mask.contains(ConfigWindow::WIDTH);
            let height_requested = request.value_mask.contains(ConfigWindow::HEIGHT);
            let x_requested = request.value_mask.contains(ConfigWindow::X);
            let y_requested = request.value_mask.contains(ConfigWindow::Y);
            if width_requested && new_rect.width != u32::from(request.width) {
                changed = true;
            }
            if height_requested && new_rect.height != u32::from(request.height) {
                changed = true;
            }
            if x_requested || y_requested {
                changed = true;
                // A lone x or y request keeps the other coordinate
                // where the window last was.
                let last = self.root.clients.last_geometry(client);
                let mut x = if x_requested {
                    i32::from(request.x)
                } else {
                    last.x
                };
                let mut y = if y_requested {
                    i32::from(request.y)
                } else {
                    last.y
                };
                // The request is root-relative; the floating geometry
                // is relative to the monitor showing the client's tag,
                // falling back to the monitor under the requested point
                // and then to the focused one.
                let tag = self.root.clients.tag_of(client);
                let monitor = self
                    .root
                    .monitors
                    .by_tag(tag)
                    .or_else(|| self.root.monitors.by_coordinate(Point::new(x, y)))
                    .unwrap_or_else(|| self.root.monitors.focused());
                let origin = self.root.monitors.content_origin(monitor);
                x -= origin.x;
                y -= origin.y;
                new_rect.x = x;
                new_rect.y = y;
            }
            if width_requested {
                new_rect.width = request.width.into();
            }
            if height_requested {
                new_rect.height = request.height.into();
            }
        }
        if changed && self.root.clients.is_floating(client) {
            self.root.clients.set_floating_geometry(client, new_rect);
            self.root.clients.apply_floating_geometry(client);
        } else if changed && self.root.clients.is_pseudotiled(client) {
            self.root.clients.set_floating_geometry(client, new_rect);
            let tag = self.root.clients.tag_of(client);
            if let Some(monitor) = self.root.monitors.by_tag(tag) {
                self.root.monitors.apply_layout(monitor);
            }
        } else {
            // Tiled clients keep their geometry; restate it so the
            // client knows (ICCCM 4.1.5).
            self.root.clients.send_configure_notify(client);
        }
    }

    fn configure_notify(&mut self, event: &Event) {
        let Event::ConfigureNotify(notify) = event else {
            return;
        };
        if notify.window == self.x.root() {
            self.root
                .panels
                .root_geometry_changed(notify.width, notify.height);
            if self.root.settings.auto_detect_monitors {
                let input = CommandInput::new("detect_monitors", Vec::new());
                let mut channels = OutputChannels::new("detect_monitors");
                self.root.monitors.detect_monitors(&input, &mut channels);
                // The output is uninteresting here; failures should
                // reach the log.
                channels.output.clear();
                channels.forward_to_log();
            }
        } else {
            let geometry = Rect::new(
                notify.x.into(),
                notify.y.into(),
                notify.width.into(),
                notify.height.into(),
            );
            self.root.panels.geometry_changed(notify.window, geometry);
        }
    }

    fn create_notify(&mut self, event: &Event) {
        let Event::CreateNotify(notify) = event else {
            return;
        };
        if self.root.ipc.is_connectable(notify.window) {
            self.root.ipc.add_connection(notify.window);
            self.service_ipc_connection(notify.window);
        }
    }

    fn destroy_notify(&mut self, event: &Event) {
        let Event::DestroyNotify(notify) = event else {
            return;
        };
        match self.root.clients.client(notify.window) {
            Some(client) => self.root.clients.force_unmanage(client),
            None => {
                self.root.desktops.unregister(notify.window);
                self.root.panels.unregister_panel(notify.window);
            }
        }
    }

    fn enter_notify(&mut self, event: &Event) {
        let Event::EnterNotify(crossing) = event else {
            return;
        };
        debug!("EnterNotify on window 0x{:x}", crossing.event);
        if crossing.mode != NotifyMode::NORMAL || crossing.detail == NotifyDetail::INFERIOR {
            // Crossings caused by (un)grabbing the pointer, and the
            // pointer moving from a window to its own decoration, are
            // noise.
            return;
        }
        self.during_enter_notify = true;
        let decoration_client = self.root.decorations.client_of(crossing.event);
        if let Some(client) = decoration_client {
            self.root.decorations.update_resize_area_cursors(client);
        }
        let window_has_focus = crossing.same_screen_focus & 0x01 != 0;
        if !self.root.mouse.is_dragging()
            && self.root.settings.focus_follows_mouse
            && !window_has_focus
        {
            let client = self.root.clients.client(crossing.event).or(decoration_client);
            match client {
                Some(client) => {
                    // In a max-layout leaf, focusing the entered client
                    // would hide the currently visible one.
                    if !self.root.clients.concealed_by_max_layout(client) {
                        self.root.clients.focus_client(Some(client), false);
                    }
                }
                None => {
                    // Not a client window; maybe a frame.
                    if let Some(frame) = self.root.frame_decorations.frame_at(crossing.event) {
                        self.root.monitors.focus_frame(frame);
                    }
                }
            }
        }
        // Consume drain requests raised by the focus change while the
        // guard still suppresses them: successive enters from fast
        // pointer movement must survive.
        self.apply_notifications();
        self.during_enter_notify = false;
    }

    fn expose(&mut self, _event: &Event) {
        // Decorations repaint themselves.
    }

    fn focus_in(&mut self, event: &Event) {
        // Keep only the newest focus event; reacting to stale ones
        // loops with our own SetInputFocus.
        let mut newest = event.clone();
        while let Some(next) = self.x.check_masked_event(EventMask::FOCUS_CHANGE) {
            newest = next;
        }
        let Event::FocusIn(focus) = newest else {
            return;
        };
        if focus.detail != NotifyDetail::NONLINEAR
            && focus.detail != NotifyDetail::NONLINEAR_VIRTUAL
        {
            return;
        }
        // A nonlinear focus change crossed our control: some client
        // called SetInputFocus itself (xdotool, emacsclient). The steal
        // cannot be prevented, so track it.
        let current = self
            .root
            .clients
            .focus()
            .map(|client| self.root.clients.window_of(client));
        if current != Some(focus.event) {
            debug!("window 0x{:x} steals the focus", focus.event);
            let target = self.root.clients.client(focus.event);
            self.root.clients.focus_client(target, false);
        }
    }

    fn key_press(&mut self, event: &Event) {
        let Event::KeyPress(press) = event else {
            return;
        };
        self.root.keys.handle_key_press(press);
    }

    fn mapping_notify(&mut self, event: &Event) {
        let Event::MappingNotify(mapping) = event else {
            return;
        };
        self.root
            .keys
            .refresh_keymap(mapping.first_keycode, mapping.count);
        if mapping.request == Mapping::KEYBOARD {
            self.root.keys.regrab_all();
        }
    }

    fn motion_notify(&mut self, event: &Event) {
        let Event::MotionNotify(motion) = event else {
            return;
        };
        // Coalesce queued motion; only the newest position matters.
        let mut newest = *motion;
        while let Some(next) = self.x.check_masked_event(EventMask::BUTTON_MOTION) {
            if let Event::MotionNotify(next) = next {
                newest = next;
            }
        }
        self.root
            .mouse
            .handle_motion_event(Point::new(newest.root_x.into(), newest.root_y.into()));
    }

    fn map_notify(&mut self, event: &Event) {
        let Event::MapNotify(notify) = event else {
            return;
        };
        match self.root.clients.client(notify.window) {
            Some(client) => {
                // Re-assert the input focus: a freshly mapped window
                // only accepts it once viewable.
                if self.root.clients.focus() == Some(client) {
                    let window = self.root.clients.window_of(client);
                    self.x.set_input_focus(window);
                }
                self.root.clients.update_title(client);
            }
            None => {
                let internal = self.root.ewmh.is_own_window(notify.window)
                    || self.root.decorations.client_of(notify.window).is_some()
                    || self.root.frame_decorations.frame_at(notify.window).is_some();
                if !internal {
                    // A window mapped without a MapRequest still gets
                    // the window rules: manage it briefly, apply them,
                    // let go again.
                    debug!(
                        "MapNotify: briefly managing 0x{:x} to apply rules",
                        notify.window
                    );
                    self.root.clients.manage_client(notify.window, true, true, None);
                }
            }
        }
    }

    fn map_request(&mut self, event: &Event) {
        let Event::MapRequest(request) = event else {
            return;
        };
        debug!("MapRequest for 0x{:x}", request.window);
        let window = request.window;
        let internal = self.root.ewmh.is_own_window(window)
            || self.root.decorations.client_of(window).is_some()
            || self.root.frame_decorations.frame_at(window).is_some();
        if internal {
            // Our own windows map when they ask to.
            if self.x.window_attributes(window).is_ok() {
                self.x.map_window(window);
            }
        } else if let Some(client) = self.root.clients.client(window) {
            // ICCCM 4.1.4 "Iconic -> Normal": a MapRequest for a managed
            // window asks for de-minimization. The layout decides actual
            // visibility, so no map here.
            self.root.clients.clear_minimized(client);
        } else {
            match self.root.ewmh.window_type(window) {
                WindowType::Desktop => {
                    self.root.desktops.register(window);
                    self.root.monitors.restack();
                    self.x.map_window(window);
                }
                WindowType::Dock => {
                    self.root.panels.register_panel(window);
                    self.x.select_input(window, EventMask::PROPERTY_CHANGE);
                    self.x.map_window(window);
                }
                WindowType::Other => {
                    if let Some(client) =
                        self.root.clients.manage_client(window, false, false, None)
                    {
                        let tag = self.root.clients.tag_of(client);
                        if self.root.monitors.by_tag(tag).is_some() {
                            self.x.map_window(window);
                        }
                    }
                }
            }
        }
    }

    fn selection_clear(&mut self, event: &Event) {
        let Event::SelectionClear(clear) = event else {
            return;
        };
        if clear.selection == self.root.ewmh.wm_selection()
            && clear.owner == self.root.ewmh.wm_window()
        {
            info!("another window manager is taking over; exiting");
            self.quit();
        }
    }

    fn property_notify(&mut self, event: &Event) {
        let Event::PropertyNotify(notify) = event else {
            return;
        };
        if notify.state == Property::DELETE {
            return;
        }
        if self.root.ipc.is_connectable(notify.window) {
            self.service_ipc_connection(notify.window);
            return;
        }
        match self.root.clients.client(notify.window) {
            Some(client) => {
                if notify.atom == u32::from(AtomEnum::WM_HINTS) {
                    self.root.clients.update_wm_hints(client);
                } else if notify.atom == u32::from(AtomEnum::WM_NORMAL_HINTS) {
                    self.root.clients.update_size_hints(client);
                    self.root.clients.clamp_floating_to_size_hints(client);
                    let tag = self.root.clients.tag_of(client);
                    if let Some(monitor) = self.root.monitors.by_tag(tag) {
                        self.root.monitors.apply_layout(monitor);
                    }
                } else if notify.atom == u32::from(AtomEnum::WM_NAME)
                    || notify.atom == self.root.ewmh.net_wm_name()
                {
                    self.root.clients.update_title(client);
                } else if notify.atom == u32::from(AtomEnum::WM_CLASS) {
                    // ICCCM allows WM_CLASS changes only in withdrawn
                    // state; some clients change it anyway, and their
                    // class rules would be missed. Re-run the rules now.
                    let mut channels = OutputChannels::new("rules");
                    self.root.clients.apply_rules(client, &mut channels);
                    channels.forward_to_log();
                }
            }
            None => self.root.panels.property_changed(notify.window, notify.atom),
        }
    }

    fn unmap_notify(&mut self, event: &Event) {
        let Event::UnmapNotify(unmap) = event else {
            return;
        };
        debug!(
            "UnmapNotify for window 0x{:x}, reported to 0x{:x}",
            unmap.window, unmap.event
        );
        if unmap.window == unmap.event {
            // Reparenting duplicates the report on the root; only the
            // window's own report counts.
            self.root.clients.unmap_notify(unmap.window);
        }
        if is_synthetic(unmap.response_type) {
            // ICCCM 4.1.4: a synthetic UnmapNotify is a withdraw
            // request. Some clients (tray starters) send only this and
            // leave the window mapped, so unmap it for real.
            self.x.unmap_window(unmap.window);
        }
        // The unmap moves the pointer into whatever was below; those
        // crossings must not shift the focus.
        self.sync_quietly();
        while self.x.check_masked_event(EventMask::ENTER_WINDOW).is_some() {}
    }
}
