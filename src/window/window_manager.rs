use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEventKind};
use super::drag::{DragPhase, DragState};
use super::geometry::{ResizeZone, apply_move, apply_resize, snap_target, zone_at};
use super::tap::{EventTap, InterceptPolicy, Route};
use super::{FloatRect, MaximizeMode, Size, ToplevelWindow, WindowError, WindowId, opts_in};
use crate::config::{ConfigError, DragEligibility, WmConfig};
use crate::event::{PointerEvent, TapEvent};

/// Shared handle to a host window. The manager only ever keeps a `Weak` to
/// it; the toolkit owns the window.
pub type WindowHandle = Rc<RefCell<dyn ToplevelWindow>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CancelReason {
    Unregistered,
    Destroyed,
    Hidden,
    FocusLost,
    Busy,
    Timeout,
    LostRelease,
    ImplicitRelease,
    Requested,
    NoScreenBounds,
}

struct ManagedWindow {
    handle: Weak<RefCell<dyn ToplevelWindow>>,
    geometry: FloatRect,
    resizable: bool,
    min_size: Size,
}

/// Gives frameless top-level windows move, resize and maximize affordances.
///
/// Windows opt in through [`register_widget`](Self::register_widget); every
/// event the host's dispatch loop sees is then offered to
/// [`filter_event`](Self::filter_event), which returns `true` when the event
/// was consumed and must not be delivered to the window's own handlers.
pub struct WindowManager {
    config: WmConfig,
    screen: FloatRect,
    windows: BTreeMap<WindowId, ManagedWindow>,
    tap: EventTap,
    drag: Option<DragState>,
    last_press: Option<(WindowId, Instant)>,
    /// Owner of a press that was swallowed without starting a drag; the rest
    /// of that pointer sequence is swallowed too.
    swallowed: Option<WindowId>,
}

impl WindowManager {
    /// Manager with default tunables for a desktop spanning `screen`.
    pub fn new(screen: FloatRect) -> Self {
        Self {
            config: WmConfig::default(),
            screen,
            windows: BTreeMap::new(),
            tap: EventTap::default(),
            drag: None,
            last_press: None,
            swallowed: None,
        }
    }

    pub fn with_config(config: WmConfig, screen: FloatRect) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(screen)
        })
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    /// Bounds used for the visible-margin clamp and the snap bands. While
    /// they are empty, move drags are refused and nothing snaps.
    pub fn set_screen_bounds(&mut self, screen: FloatRect) {
        self.screen = screen;
    }

    pub fn screen_bounds(&self) -> FloatRect {
        self.screen
    }

    pub fn is_registered(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn registered_count(&self) -> usize {
        self.windows.len()
    }

    pub fn tap_installed(&self) -> bool {
        self.tap.is_installed()
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn phase(&self) -> DragPhase {
        self.drag.map_or(DragPhase::Idle, |drag| drag.phase)
    }

    /// Last geometry the manager knows for `id`, refreshed on every press and
    /// every command it issues.
    pub fn cached_geometry(&self, id: WindowId) -> Option<FloatRect> {
        self.windows.get(&id).map(|window| window.geometry)
    }

    /// Start managing `window` if it opts in. Registering twice, a child
    /// widget, an opted-out window or a window that cannot be borrowed right
    /// now is silently ignored. Returns whether the window was added.
    pub fn register_widget(&mut self, window: WindowHandle) -> bool {
        let Ok(win) = window.try_borrow() else {
            tracing::warn!("window busy during registration; ignoring");
            return false;
        };
        let id = win.id();
        if self.windows.contains_key(&id) {
            return false;
        }
        if !win.is_toplevel() {
            return false;
        }
        if !opts_in(&*win) {
            tracing::debug!(window_id = ?id, "window opted out of style window manager");
            return false;
        }
        let resizable = win.is_resizable();
        let entry = ManagedWindow {
            handle: Rc::downgrade(&window),
            geometry: win.geometry(),
            resizable,
            min_size: win.min_size(),
        };
        drop(win);
        self.windows.insert(id, entry);
        self.tap.watch(id, InterceptPolicy::for_resizable(resizable));
        tracing::debug!(window_id = ?id, resizable, "registered window");
        true
    }

    /// Stop managing `id`. A drag owned by it is cancelled before this
    /// returns. Unknown ids are ignored. Returns whether anything was removed.
    pub fn unregister_widget(&mut self, id: WindowId) -> bool {
        self.forget(id, CancelReason::Unregistered)
    }

    /// Offer one dispatched event to the manager. Returns `true` when the
    /// event was consumed.
    pub fn filter_event(&mut self, event: &TapEvent) -> bool {
        let active = self.drag.map(|drag| drag.window).or(self.swallowed);
        match self.tap.route(event, active) {
            Route::Ignore => false,
            Route::Pointer => match event {
                TapEvent::Pointer(pointer) => self.handle_pointer(pointer),
                _ => false,
            },
            Route::Lifecycle(id) => {
                self.handle_lifecycle(event, id);
                false
            }
        }
    }

    /// Cancel a sequence that has been silent for longer than the configured
    /// timeout. Hosts call this from their idle/timer path.
    pub fn tick(&mut self, now: Instant) {
        if let Some(drag) = self.drag
            && now.saturating_duration_since(drag.last_event_at) >= self.config.sequence_timeout
        {
            self.cancel_drag(CancelReason::Timeout);
        }
    }

    /// Drop any in-flight sequence without issuing further commands.
    pub fn cancel(&mut self) {
        if self.drag.is_some() {
            self.cancel_drag(CancelReason::Requested);
        }
    }

    fn handle_lifecycle(&mut self, event: &TapEvent, id: WindowId) {
        match event {
            TapEvent::Destroyed(_) => {
                self.forget(id, CancelReason::Destroyed);
            }
            TapEvent::Reparented(_) => {
                // no longer a top-level
                self.forget(id, CancelReason::Unregistered);
            }
            TapEvent::Hidden(_) => self.cancel_owned_by(id, CancelReason::Hidden),
            TapEvent::FocusLost(_) => self.cancel_owned_by(id, CancelReason::FocusLost),
            TapEvent::Pointer(_) => {}
        }
    }

    fn handle_pointer(&mut self, pointer: &PointerEvent) -> bool {
        match pointer.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_press(pointer),
            MouseEventKind::Drag(MouseButton::Left) => self.on_move(pointer),
            MouseEventKind::Up(MouseButton::Left) => self.on_release(pointer),
            MouseEventKind::Moved => {
                // A buttonless move means the release never arrived.
                self.swallowed = None;
                if self.drag.is_some() {
                    self.cancel_drag(CancelReason::LostRelease);
                }
                false
            }
            _ => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.last_event_at = pointer.timestamp;
                    return drag.phase.intercepts();
                }
                self.swallowed.is_some()
            }
        }
    }

    fn on_press(&mut self, pointer: &PointerEvent) -> bool {
        self.swallowed = None;
        if self.drag.is_some() {
            self.cancel_drag(CancelReason::ImplicitRelease);
        }
        let Some(hit) = pointer.target else {
            return false;
        };
        let Some(policy) = self.tap.policy(hit.window) else {
            return false;
        };
        let eligibility = self.config.eligibility(hit.widget);
        if eligibility == DragEligibility::Ineligible {
            return false;
        }
        let id = hit.window;
        let geometry = match self.refresh_geometry(id) {
            Ok(geometry) => geometry,
            Err(err) => {
                self.handle_command_error(id, err);
                return false;
            }
        };
        let resizable = policy.allows_resize()
            && self.windows.get(&id).is_some_and(|window| window.resizable);
        let zone = zone_at(
            geometry,
            pointer.position,
            self.config.border_inset,
            resizable,
        );

        if zone == ResizeZone::None && eligibility == DragEligibility::Immediate {
            if let Some((prev_id, prev)) = self.last_press
                && prev_id == id
                && pointer.timestamp.saturating_duration_since(prev)
                    <= self.config.double_click_interval
            {
                self.last_press = None;
                tracing::debug!(window_id = ?id, "double press; toggling maximize");
                if let Err(err) = self.command(id, |window| {
                    window.maximize(MaximizeMode::ToggleMaximize)
                }) {
                    self.handle_command_error(id, err);
                }
                if self.windows.contains_key(&id) {
                    self.swallowed = Some(id);
                }
                return true;
            }
            self.last_press = Some((id, pointer.timestamp));
        } else {
            self.last_press = None;
        }

        let consume = eligibility == DragEligibility::Immediate || zone.is_resize();
        let mut drag = DragState::armed(id, pointer.position, zone, geometry, pointer.timestamp);
        drag.consumed_press = consume;
        self.drag = Some(drag);
        tracing::debug!(window_id = ?id, ?zone, consumed = consume, "armed");
        consume
    }

    fn on_move(&mut self, pointer: &PointerEvent) -> bool {
        let Some(mut drag) = self.drag else {
            return self.swallowed.is_some();
        };
        drag.last_event_at = pointer.timestamp;
        if drag.phase == DragPhase::Armed {
            if !drag.promote(pointer.position, self.config.drag_threshold) {
                self.drag = Some(drag);
                return drag.consumed_press;
            }
            tracing::debug!(window_id = ?drag.window, phase = ?drag.phase, "drag started");
        }
        drag.last_pointer = pointer.position;
        self.drag = Some(drag);
        self.apply_drag(drag);
        true
    }

    fn on_release(&mut self, pointer: &PointerEvent) -> bool {
        let Some(drag) = self.drag else {
            return self.swallowed.take().is_some();
        };
        if !drag.phase.intercepts() {
            self.drag = None;
            return drag.consumed_press;
        }
        if drag.last_pointer != pointer.position {
            let mut last = drag;
            last.last_pointer = pointer.position;
            self.drag = Some(last);
            self.apply_drag(last);
        }
        // a failed command has already torn the sequence down
        let Some(drag) = self.drag.take() else {
            return true;
        };
        // a completed drag is never the first half of a double press
        self.last_press = None;
        if drag.phase == DragPhase::Dragging
            && let Some(mode) =
                snap_target(pointer.position, self.screen, self.config.snap_edge_width)
        {
            tracing::debug!(window_id = ?drag.window, ?mode, "released in snap band");
            if let Err(err) = self.command(drag.window, |window| window.maximize(mode)) {
                self.handle_command_error(drag.window, err);
            }
        }
        tracing::debug!(window_id = ?drag.window, phase = ?drag.phase, "drag finished");
        true
    }

    fn apply_drag(&mut self, drag: DragState) {
        let id = drag.window;
        let (dx, dy) = drag.displacement();
        let result = match drag.phase {
            DragPhase::Dragging => {
                let Some(origin) = apply_move(
                    drag.start_geometry,
                    dx,
                    dy,
                    self.screen,
                    self.config.min_visible_margin,
                ) else {
                    tracing::warn!(window_id = ?id, "no screen bounds; refusing to move window");
                    self.cancel_drag(CancelReason::NoScreenBounds);
                    return;
                };
                self.command(id, |window| window.move_to(origin))
                    .map(|()| drag.start_geometry.with_origin(origin))
            }
            DragPhase::Resizing => {
                let min = self
                    .windows
                    .get(&id)
                    .map_or(Size::new(1, 1), |window| window.min_size);
                let rect = apply_resize(drag.start_geometry, drag.zone, dx, dy, min);
                self.command(id, |window| window.resize_to(rect))
                    .map(|()| rect)
            }
            DragPhase::Idle | DragPhase::Armed => return,
        };
        match result {
            Ok(geometry) => {
                if let Some(window) = self.windows.get_mut(&id) {
                    window.geometry = geometry;
                }
            }
            Err(err) => self.handle_command_error(id, err),
        }
    }

    fn refresh_geometry(&mut self, id: WindowId) -> Result<FloatRect, WindowError> {
        let entry = self.windows.get_mut(&id).ok_or(WindowError::Destroyed)?;
        let handle = entry.handle.upgrade().ok_or(WindowError::Destroyed)?;
        let geometry = handle
            .try_borrow()
            .map_err(|_| WindowError::Busy)?
            .geometry();
        entry.geometry = geometry;
        Ok(geometry)
    }

    fn command<F>(&self, id: WindowId, f: F) -> Result<(), WindowError>
    where
        F: FnOnce(&mut dyn ToplevelWindow) -> Result<(), WindowError>,
    {
        let handle = self
            .windows
            .get(&id)
            .and_then(|window| window.handle.upgrade())
            .ok_or(WindowError::Destroyed)?;
        let mut window = handle.try_borrow_mut().map_err(|_| WindowError::Busy)?;
        f(&mut *window)
    }

    fn handle_command_error(&mut self, id: WindowId, err: WindowError) {
        tracing::warn!(window_id = ?id, %err, "window command failed");
        match err {
            WindowError::Destroyed => {
                self.forget(id, CancelReason::Destroyed);
            }
            WindowError::Busy => self.cancel_owned_by(id, CancelReason::Busy),
        }
    }

    fn forget(&mut self, id: WindowId, reason: CancelReason) -> bool {
        self.cancel_owned_by(id, reason);
        if self.last_press.is_some_and(|(prev, _)| prev == id) {
            self.last_press = None;
        }
        if self.swallowed == Some(id) {
            self.swallowed = None;
        }
        self.tap.unwatch(id);
        if self.windows.remove(&id).is_none() {
            return false;
        }
        tracing::debug!(window_id = ?id, ?reason, "unregistered window");
        true
    }

    fn cancel_owned_by(&mut self, id: WindowId, reason: CancelReason) {
        if self.drag.is_some_and(|drag| drag.window == id) {
            self.cancel_drag(reason);
        }
    }

    fn cancel_drag(&mut self, reason: CancelReason) {
        if let Some(drag) = self.drag.take() {
            tracing::debug!(
                window_id = ?drag.window,
                phase = ?drag.phase,
                ?reason,
                "pointer sequence reset"
            );
        }
    }
}
