//! Pointer interaction: hit testing plus the translation of pointer events
//! into viewport transitions. Everything here is a plain function over
//! `(positions, viewport, pointer)` so the logic tests without a browser.

use crate::layout::{Point, PositionMap};
use crate::viewport::{DragState, ViewportState};

/// Pointer-to-node capture distance in canvas pixels.
pub const HIT_RADIUS: f64 = 15.0;

/// Resolve the canvas-local pointer position to a node id. The viewport
/// offset is applied additively to each layout position, matching the way
/// the renderer translates shapes. First node within [`HIT_RADIUS`] wins;
/// the tie-break between overlapping nodes is map iteration order and is
/// deliberately unspecified.
pub fn hit_test<'a>(
    positions: &'a PositionMap,
    viewport: &ViewportState,
    x: f64,
    y: f64,
) -> Option<&'a str> {
    positions.iter().find_map(|(id, pos)| {
        let dx = x - (pos.x + viewport.offset.x);
        let dy = y - (pos.y + viewport.offset.y);
        // Strictly inside: a pointer at exactly HIT_RADIUS is a miss.
        ((dx * dx + dy * dy).sqrt() < HIT_RADIUS).then_some(id.as_str())
    })
}

/// Press: a node under the pointer takes priority over panning, so a drag
/// only starts on empty canvas. Returns true if a drag began.
pub fn pointer_down(
    viewport: &mut ViewportState,
    positions: &PositionMap,
    x: f64,
    y: f64,
) -> bool {
    if hit_test(positions, viewport, x, y).is_some() {
        return false;
    }
    viewport.begin_drag(Point::new(x, y));
    true
}

/// Move: pans while dragging and refreshes hover either way. Returns true
/// when the viewport or hover changed and a repaint is needed.
pub fn pointer_move(
    viewport: &mut ViewportState,
    positions: &PositionMap,
    x: f64,
    y: f64,
) -> bool {
    let mut changed = false;

    if let DragState::Dragging { last } = viewport.drag {
        let (dx, dy) = (x - last.x, y - last.y);
        if dx != 0.0 || dy != 0.0 {
            viewport.pan_by(dx, dy);
            viewport.begin_drag(Point::new(x, y));
            changed = true;
        }
    }

    let hit = hit_test(positions, viewport, x, y).map(str::to_owned);
    if hit != viewport.hovered {
        viewport.set_hover(hit);
        changed = true;
    }
    changed
}

pub fn pointer_up(viewport: &mut ViewportState) {
    viewport.end_drag();
}

/// Leaving the canvas ends any drag and clears the hover.
pub fn pointer_leave(viewport: &mut ViewportState) {
    viewport.end_drag();
    viewport.set_hover(None);
}

/// Wheel: one clamped zoom step per notch, scrolling up zooms in.
pub fn wheel(viewport: &mut ViewportState, delta: f64) {
    if delta < 0.0 {
        viewport.zoom_in();
    } else if delta > 0.0 {
        viewport.zoom_out();
    }
}

/// Click resolution. Never mutates the viewport; the shell forwards the
/// resolved node to the host callback.
pub fn click_target<'a>(
    positions: &'a PositionMap,
    viewport: &ViewportState,
    x: f64,
    y: f64,
) -> Option<&'a str> {
    hit_test(positions, viewport, x, y)
}
