//! Tunables for the window manager.
//!
//! Every pixel threshold the state machine uses lives here rather than being
//! hard-coded at the call site, so hosts with different DPI or pointer
//! precision can adjust them.

use std::collections::BTreeSet;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{
    BORDER_INSET, DOUBLE_CLICK_INTERVAL, DRAG_THRESHOLD, MIN_VISIBLE_MARGIN, SEQUENCE_TIMEOUT,
    SNAP_EDGE_WIDTH,
};
use crate::event::WidgetKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("drag threshold must be at least 1 pixel")]
    ZeroDragThreshold,
    #[error("widget kind {0:?} is listed as both immediate and deferred drag region")]
    ConflictingRegion(WidgetKind),
    #[error("widget kind {0:?} is interactive and cannot start a drag")]
    InteractiveRegion(WidgetKind),
}

/// How a press on a given widget kind is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEligibility {
    /// The widget never starts a drag; the press is left alone.
    Ineligible,
    /// A drag may start, but the press still reaches the widget until the
    /// threshold is crossed.
    Deferred,
    /// The widget is plain window chrome; the press is consumed right away.
    Immediate,
}

#[derive(Debug, Clone)]
pub struct WmConfig {
    pub border_inset: u16,
    pub drag_threshold: u16,
    pub min_visible_margin: u16,
    pub snap_edge_width: u16,
    pub double_click_interval: Duration,
    pub sequence_timeout: Duration,
    /// Widget kinds whose press is consumed immediately.
    pub immediate_regions: BTreeSet<WidgetKind>,
    /// Non-interactive descendants a drag may start from without consuming
    /// the press.
    pub deferred_regions: BTreeSet<WidgetKind>,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            border_inset: BORDER_INSET,
            drag_threshold: DRAG_THRESHOLD,
            min_visible_margin: MIN_VISIBLE_MARGIN,
            snap_edge_width: SNAP_EDGE_WIDTH,
            double_click_interval: DOUBLE_CLICK_INTERVAL,
            sequence_timeout: SEQUENCE_TIMEOUT,
            immediate_regions: [WidgetKind::Surface, WidgetKind::TitleBar]
                .into_iter()
                .collect(),
            deferred_regions: [WidgetKind::Label, WidgetKind::Frame, WidgetKind::Spacer]
                .into_iter()
                .collect(),
        }
    }
}

impl WmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drag_threshold == 0 {
            return Err(ConfigError::ZeroDragThreshold);
        }
        for kind in self.immediate_regions.iter().chain(&self.deferred_regions) {
            if kind.is_interactive() {
                return Err(ConfigError::InteractiveRegion(*kind));
            }
        }
        if let Some(kind) = self
            .immediate_regions
            .intersection(&self.deferred_regions)
            .next()
        {
            return Err(ConfigError::ConflictingRegion(*kind));
        }
        Ok(())
    }

    pub fn eligibility(&self, kind: WidgetKind) -> DragEligibility {
        if kind.is_interactive() {
            DragEligibility::Ineligible
        } else if self.immediate_regions.contains(&kind) {
            DragEligibility::Immediate
        } else if self.deferred_regions.contains(&kind) {
            DragEligibility::Deferred
        } else {
            DragEligibility::Ineligible
        }
    }
}
