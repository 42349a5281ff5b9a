//! Pan/zoom/hover state and its pure transition functions. The reducers are
//! framework-free so interaction logic is unit-testable without a browser.

use crate::layout::{LayoutMode, Point};

pub const SCALE_MIN: f64 = 0.5;
pub const SCALE_MAX: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

const HOME_OFFSET: Point = Point { x: 50.0, y: 50.0 };

/// Drag state machine: `Idle -> (press on empty canvas) -> Dragging ->
/// (release or leave) -> Idle`. Hover is tracked separately and updates
/// regardless of drag state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { last: Point },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    pub scale: f64,
    pub offset: Point,
    pub hovered: Option<String>,
    pub mode: LayoutMode,
    pub drag: DragState,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: HOME_OFFSET,
            hovered: None,
            mode: LayoutMode::default(),
            drag: DragState::Idle,
        }
    }
}

impl ViewportState {
    pub fn zoom_in(&mut self) {
        self.scale = clamp_scale(self.scale + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.scale = clamp_scale(self.scale - ZOOM_STEP);
    }

    pub fn can_zoom_in(&self) -> bool {
        self.scale < SCALE_MAX
    }

    pub fn can_zoom_out(&self) -> bool {
        self.scale > SCALE_MIN
    }

    /// Restore scale and offset; hover and layout mode are not touched.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = HOME_OFFSET;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    pub fn set_hover(&mut self, id: Option<String>) {
        self.hovered = id;
    }

    pub fn set_mode(&mut self, mode: LayoutMode) {
        self.mode = mode;
    }

    pub fn begin_drag(&mut self, at: Point) {
        self.drag = DragState::Dragging { last: at };
    }

    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

fn clamp_scale(scale: f64) -> f64 {
    // Step arithmetic can leave float dust past the bound; clamp keeps the
    // published [0.5, 2.0] contract exact.
    scale.clamp(SCALE_MIN, SCALE_MAX)
}
