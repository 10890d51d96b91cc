//! Shared crate-wide constants.

use std::time::Duration;

/// Minimum number of pixels a dragged window must keep within the screen
/// bounds so the user can grab it again.
pub const MIN_VISIBLE_MARGIN: u16 = 24;

/// Width (in pixels) of the band inside each window edge that starts a
/// resize instead of a move.
///
/// Measured per edge from the window's outer geometry. Corners are the
/// intersection of two bands.
pub const BORDER_INSET: u16 = 6;

/// Manhattan distance (in pixels) the pointer must exceed from the press
/// point before a press is promoted to a drag or resize.
///
/// Anything shorter stays a click and is delivered to the widget untouched.
pub const DRAG_THRESHOLD: u16 = 4;

/// Width (in pixels) of the screen-edge band that triggers maximize and
/// half-maximize when a move drag is released inside it.
pub const SNAP_EDGE_WIDTH: u16 = 2;

/// Two presses on the same window's drag region closer than this toggle
/// maximize.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// A pointer sequence that sees no event for this long is assumed to have
/// lost its release and is cancelled by `WindowManager::tick`.
pub const SEQUENCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Window property consulted at registration time. Absent means enabled.
pub const OPT_IN_PROPERTY: &str = "useStyleWindowManager";
