pub mod drag;
pub mod geometry;

mod tap;
mod window_manager;

use thiserror::Error;

use crate::constants::OPT_IN_PROPERTY;

pub use drag::{DragPhase, DragState};
pub use geometry::ResizeZone;
pub use window_manager::{WindowHandle, WindowManager};

/// Stable identity of a top-level window. Hosts must never reuse an id for a
/// different window, even after the original is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A point in screen coordinates. May be negative on multi-head setups, where
/// screens left of or above the primary have negative origins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    pub fn delta_from(self, origin: Point) -> (i32, i32) {
        (
            self.x.saturating_sub(origin.x),
            self.y.saturating_sub(origin.y),
        )
    }

    pub fn manhattan_distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Signed window origin with unsigned size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn with_origin(self, origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfSide {
    Left,
    Right,
}

/// Maximize requests issued by the manager's gesture hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaximizeMode {
    Maximize,
    ToggleMaximize,
    HalfMaximize(HalfSide),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    #[error("window was destroyed")]
    Destroyed,
    #[error("window is busy and cannot accept geometry changes")]
    Busy,
}

/// The command surface a host window exposes to the manager.
///
/// Geometry commands must be applied (or queued so that they are observable)
/// before the next event reaches the tap. Returning
/// [`WindowError::Destroyed`] makes the manager drop the window on the spot.
pub trait ToplevelWindow {
    fn id(&self) -> WindowId;

    fn geometry(&self) -> FloatRect;

    fn min_size(&self) -> Size {
        Size::new(1, 1)
    }

    fn is_resizable(&self) -> bool {
        true
    }

    /// Whether the object is a top-level window at all; child widgets are
    /// never managed.
    fn is_toplevel(&self) -> bool {
        true
    }

    /// Loosely typed boolean property lookup. `None` means the property is
    /// not set.
    fn bool_property(&self, _name: &str) -> Option<bool> {
        None
    }

    fn move_to(&mut self, origin: Point) -> Result<(), WindowError>;

    fn resize_to(&mut self, geometry: FloatRect) -> Result<(), WindowError>;

    /// Maximize hooks are advisory; windows that cannot honour them keep the
    /// default no-op.
    fn maximize(&mut self, _mode: MaximizeMode) -> Result<(), WindowError> {
        Ok(())
    }
}

/// Tri-state reading of the opt-in property: absent and `true` both enable.
pub fn opts_in(window: &dyn ToplevelWindow) -> bool {
    window.bool_property(OPT_IN_PROPERTY).unwrap_or(true)
}
