//! Per-gesture state and the latch / intercept / commit decision tables.

use passport_model::{DragAxis, PanelMode};

/// State of the single live pointer sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    pub origin_x: f32,
    pub origin_y: f32,
    pub axis: DragAxis,
    /// Slop exceeded; axis and interception are latched.
    pub started: bool,
    pub intercepted: bool,
    pub children_cancelled: bool,
    pub offset_h: f32,
    pub offset_v: f32,
}

impl GestureState {
    pub fn begin(x: f32, y: f32) -> Self {
        Self {
            origin_x: x,
            origin_y: y,
            ..Default::default()
        }
    }

    pub fn delta(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.origin_x, y - self.origin_y)
    }

    /// Apply live offsets on the latched axis only.
    pub fn track(&mut self, dx: f32, dy: f32) {
        match self.axis {
            DragAxis::Horizontal => {
                self.offset_h = dx;
                self.offset_v = 0.0;
            }
            DragAxis::Vertical => {
                self.offset_h = 0.0;
                self.offset_v = dy;
            }
            DragAxis::None => {}
        }
    }
}

/// Strict comparator: equal displacement resolves to vertical.
pub fn latch_axis(dx: f32, dy: f32) -> DragAxis {
    if dx.abs() > dy.abs() {
        DragAxis::Horizontal
    } else {
        DragAxis::Vertical
    }
}

pub fn exceeds_slop(dx: f32, dy: f32, slop: f32) -> bool {
    dx.abs() > slop || dy.abs() > slop
}

pub fn should_intercept(
    mode: PanelMode,
    axis: DragAxis,
    dx: f32,
    dy: f32,
    list_at_bottom: bool,
) -> bool {
    match (mode, axis) {
        (PanelMode::List, DragAxis::Horizontal) => true,
        (PanelMode::Profile, DragAxis::Horizontal) => dx < 0.0,
        (PanelMode::Leaderboard, DragAxis::Horizontal) => dx > 0.0,
        (PanelMode::List, DragAxis::Vertical) => list_at_bottom && dy < 0.0,
        (PanelMode::Scanner, DragAxis::Vertical) => dy > 0.0,
        _ => false,
    }
}

/// Mode a release at `(dx, dy)` lands on. `threshold` must be strictly
/// exceeded.
pub fn commit_target(
    mode: PanelMode,
    axis: DragAxis,
    dx: f32,
    dy: f32,
    list_at_bottom: bool,
    threshold: f32,
) -> PanelMode {
    match (mode, axis) {
        (PanelMode::List, DragAxis::Horizontal) if dx < -threshold => {
            PanelMode::Leaderboard
        }
        (PanelMode::List, DragAxis::Horizontal) if dx > threshold => {
            PanelMode::Profile
        }
        (PanelMode::Profile, DragAxis::Horizontal) if dx < -threshold => {
            PanelMode::List
        }
        (PanelMode::Leaderboard, DragAxis::Horizontal) if dx > threshold => {
            PanelMode::List
        }
        (PanelMode::List, DragAxis::Vertical)
            if list_at_bottom && dy < -threshold =>
        {
            PanelMode::Scanner
        }
        (PanelMode::Scanner, DragAxis::Vertical) if dy > threshold => {
            PanelMode::List
        }
        _ => mode,
    }
}
