use std::time::Instant;

use passport_model::PanelMode;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample in absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    pub timestamp: Instant,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32, timestamp: Instant) -> Self {
        Self {
            phase,
            x,
            y,
            timestamp,
        }
    }

    pub fn down(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Down, x, y, timestamp)
    }

    pub fn moved(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Move, x, y, timestamp)
    }

    pub fn up(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Up, x, y, timestamp)
    }

    pub fn cancel(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Cancel, x, y, timestamp)
    }
}

/// What the host should do with the event it just dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    /// The controller consumed the event; do not forward it to children.
    pub intercepted: bool,
    /// Send a synthetic cancel to whichever child saw the earlier events.
    /// Set at most once per gesture.
    pub cancel_children: bool,
}

impl PointerOutcome {
    pub const PASS_THROUGH: Self = Self {
        intercepted: false,
        cancel_children: false,
    };

    pub const CONSUMED: Self = Self {
        intercepted: true,
        cancel_children: false,
    };
}

/// Camera lifecycle requests raised when a settle lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationSignal {
    StartCamera,
    StopCamera,
}

/// Reported by `tick` on the frame a settle animation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleComplete {
    pub mode: PanelMode,
    pub previous: PanelMode,
    pub signal: Option<NavigationSignal>,
}

impl SettleComplete {
    pub(crate) fn new(mode: PanelMode, previous: PanelMode) -> Self {
        let signal = if mode == PanelMode::Scanner {
            Some(NavigationSignal::StartCamera)
        } else if previous == PanelMode::Scanner {
            Some(NavigationSignal::StopCamera)
        } else {
            None
        };
        Self {
            mode,
            previous,
            signal,
        }
    }
}
