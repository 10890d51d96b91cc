//! Events routed through the tap.
//!
//! Pointer vocabulary (`MouseEventKind`, `MouseButton`, `KeyModifiers`) is
//! borrowed from crossterm so terminal hosts can forward their events as-is;
//! positions are always screen coordinates.

use std::time::Instant;

use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};

use crate::window::{Point, WindowId};

/// Coarse role of the widget the toolkit hit-tested a press onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidgetKind {
    /// The top-level window itself (no child under the pointer).
    Surface,
    TitleBar,
    Label,
    Frame,
    Spacer,
    Button,
    Input,
    Slider,
    ScrollBar,
    Menu,
    Other,
}

impl WidgetKind {
    /// Widgets that react to presses on their own.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            WidgetKind::Button
                | WidgetKind::Input
                | WidgetKind::Slider
                | WidgetKind::ScrollBar
                | WidgetKind::Menu
        )
    }
}

/// Result of the toolkit's hit test: the top-level window owning the target
/// widget, and what the widget is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub window: WindowId,
    pub widget: WidgetKind,
}

impl Hit {
    pub fn surface(window: WindowId) -> Self {
        Self {
            window,
            widget: WidgetKind::Surface,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: MouseEventKind,
    pub position: Point,
    pub modifiers: KeyModifiers,
    /// `None` when the pointer is over no toolkit window at all.
    pub target: Option<Hit>,
    pub timestamp: Instant,
}

impl PointerEvent {
    pub fn new(kind: MouseEventKind, position: Point, target: Option<Hit>) -> Self {
        Self {
            kind,
            position,
            modifiers: KeyModifiers::NONE,
            target,
            timestamp: Instant::now(),
        }
    }

    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn press(position: Point, target: Option<Hit>) -> Self {
        Self::new(MouseEventKind::Down(MouseButton::Left), position, target)
    }

    pub fn drag(position: Point, target: Option<Hit>) -> Self {
        Self::new(MouseEventKind::Drag(MouseButton::Left), position, target)
    }

    pub fn release(position: Point, target: Option<Hit>) -> Self {
        Self::new(MouseEventKind::Up(MouseButton::Left), position, target)
    }

    pub fn target_window(&self) -> Option<WindowId> {
        self.target.map(|hit| hit.window)
    }
}

/// Everything the dispatch loop forwards to the tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapEvent {
    Pointer(PointerEvent),
    FocusLost(WindowId),
    Hidden(WindowId),
    Reparented(WindowId),
    Destroyed(WindowId),
}

impl TapEvent {
    pub fn window(&self) -> Option<WindowId> {
        match self {
            TapEvent::Pointer(pointer) => pointer.target_window(),
            TapEvent::FocusLost(id)
            | TapEvent::Hidden(id)
            | TapEvent::Reparented(id)
            | TapEvent::Destroyed(id) => Some(*id),
        }
    }
}
