//! Viewport-aware panel placement
//!
//! Panels sit centered under their trigger, flip above when the bottom of the
//! viewport is too close, and are always clamped fully on-screen. All values
//! are terminal cells.

use ratatui::layout::Rect;

/// Width/height of a tooltip panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSize {
    pub width: u16,
    pub height: u16,
}

impl PanelSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Which side of the trigger the panel ended up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Below,
    Above,
}

/// Resolved panel position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Absolute panel area, always inside the viewport
    pub area: Rect,
    /// Horizontal center of the panel, relative to the viewport's left edge
    pub center_x: u16,
    pub side: Side,
}

/// Compute where a panel of `panel` size goes for `trigger` inside `viewport`
///
/// A panel larger than the viewport is shrunk to the viewport first.
pub fn compute_placement(trigger: Rect, viewport: Rect, panel: PanelSize, gap: u16) -> Placement {
    let width = panel.width.min(viewport.width);
    let height = panel.height.min(viewport.height);
    let half = i32::from(width / 2);

    // Viewport-relative and signed: a trigger may hang partially off-screen
    let vw = i32::from(viewport.width);
    let vh = i32::from(viewport.height);
    let trigger_left = i32::from(trigger.x) - i32::from(viewport.x);
    let trigger_top = i32::from(trigger.y) - i32::from(viewport.y);
    let trigger_bottom = trigger_top + i32::from(trigger.height);

    let min_center = half;
    let max_center = vw - (i32::from(width) - half);
    let center = (trigger_left + i32::from(trigger.width) / 2).clamp(min_center, max_center);
    let left = center - half;

    let gap = i32::from(gap);
    let h = i32::from(height);
    let below_top = trigger_bottom + gap;
    let space_below = vh - below_top;
    let space_above = trigger_top - gap;

    let (side, top) = if below_top + h > vh && space_above > space_below {
        (Side::Above, trigger_top - gap - h)
    } else {
        (Side::Below, below_top)
    };
    let top = top.clamp(0, vh - h);

    Placement {
        area: Rect::new(
            viewport.x + left as u16,
            viewport.y + top as u16,
            width,
            height,
        ),
        center_x: center as u16,
        side,
    }
}
