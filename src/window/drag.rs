//! The single in-flight pointer interaction.

use std::time::Instant;

use super::geometry::ResizeZone;
use super::{FloatRect, Point, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pressed inside a drag region, threshold not crossed yet.
    Armed,
    Dragging,
    Resizing,
}

impl DragPhase {
    /// Phases in which every pointer event of the sequence is swallowed.
    pub fn intercepts(self) -> bool {
        matches!(self, DragPhase::Dragging | DragPhase::Resizing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub window: WindowId,
    pub phase: DragPhase,
    /// Pointer position at press, screen coordinates.
    pub anchor: Point,
    pub last_pointer: Point,
    pub zone: ResizeZone,
    pub pressed_at: Instant,
    /// Timestamp of the newest event seen for this sequence.
    pub last_event_at: Instant,
    /// Window geometry captured at press; move and resize are computed
    /// against it rather than accumulated per event.
    pub start_geometry: FloatRect,
    /// Whether the press itself was swallowed.
    pub consumed_press: bool,
}

impl DragState {
    pub fn armed(
        window: WindowId,
        anchor: Point,
        zone: ResizeZone,
        start_geometry: FloatRect,
        pressed_at: Instant,
    ) -> Self {
        Self {
            window,
            phase: DragPhase::Armed,
            anchor,
            last_pointer: anchor,
            zone,
            pressed_at,
            last_event_at: pressed_at,
            start_geometry,
            consumed_press: false,
        }
    }

    /// Promote an armed press once `pointer` has travelled further than `threshold`.
    /// Returns whether the phase changed.
    pub fn promote(&mut self, pointer: Point, threshold: u16) -> bool {
        if self.phase != DragPhase::Armed {
            return false;
        }
        if self.anchor.manhattan_distance(pointer) <= u32::from(threshold) {
            return false;
        }
        self.phase = if self.zone.is_resize() {
            DragPhase::Resizing
        } else {
            DragPhase::Dragging
        };
        true
    }

    /// Net pointer displacement since the press.
    pub fn displacement(&self) -> (i32, i32) {
        self.last_pointer.delta_from(self.anchor)
    }
}
