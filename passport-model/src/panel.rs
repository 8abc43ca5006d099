//! Panel and drag vocabulary shared by the navigation engine and the shell.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four full-screen panels arranged in a cross.
///
/// ```text
///   Profile  <--swipe-->  List (hub)  <--swipe-->  Leaderboard
///                             |
///                        pull up/down
///                             |
///                          Scanner
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PanelMode {
    #[default]
    List,
    Profile,
    Leaderboard,
    Scanner,
}

impl PanelMode {
    pub const ALL: [Self; 4] =
        [Self::List, Self::Profile, Self::Leaderboard, Self::Scanner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Profile => "profile",
            Self::Leaderboard => "leaderboard",
            Self::Scanner => "scanner",
        }
    }
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis a drag gesture is locked to once it leaves the touch slop.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DragAxis {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Screen size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Pixel translation of a panel relative to its resting origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub x: f32,
    pub y: f32,
}

impl Translation {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `end` at progress `p`.
    pub fn lerp(self, end: Self, p: f32) -> Self {
        Self {
            x: self.x + (end.x - self.x) * p,
            y: self.y + (end.y - self.y) * p,
        }
    }
}

/// Translations of all four panels, as consumed by the rendering layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub profile: Translation,
    pub hub: Translation,
    pub leaderboard: Translation,
    pub scanner: Translation,
}

impl PanelLayout {
    pub fn lerp(&self, end: &Self, p: f32) -> Self {
        Self {
            profile: self.profile.lerp(end.profile, p),
            hub: self.hub.lerp(end.hub, p),
            leaderboard: self.leaderboard.lerp(end.leaderboard, p),
            scanner: self.scanner.lerp(end.scanner, p),
        }
    }

    /// Panel translation keyed by mode.
    pub fn panel(&self, mode: PanelMode) -> Translation {
        match mode {
            PanelMode::List => self.hub,
            PanelMode::Profile => self.profile,
            PanelMode::Leaderboard => self.leaderboard,
            PanelMode::Scanner => self.scanner,
        }
    }
}
