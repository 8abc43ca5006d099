//! Configuration for the navigation controller

use std::time::Duration;

use super::easing::EasingKind;
use crate::constants::navigation as nav_cfg;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationConfig {
    /// Displacement (px) on either axis before a drag latches.
    pub touch_slop_px: f32,
    /// Release displacement (px) that must be strictly exceeded to commit.
    pub commit_threshold_px: f32,
    /// Window after a gesture ends in which taps are ignored.
    pub tap_suppression: Duration,
    /// Duration of the settle animation after release or programmatic
    /// navigation.
    pub settle_duration: Duration,
    pub settle_easing: EasingKind,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            touch_slop_px: nav_cfg::TOUCH_SLOP_PX,
            commit_threshold_px: nav_cfg::COMMIT_THRESHOLD_PX,
            tap_suppression: Duration::from_millis(nav_cfg::TAP_SUPPRESSION_MS),
            settle_duration: Duration::from_millis(nav_cfg::SETTLE_MS),
            settle_easing: EasingKind::decelerate(),
        }
    }
}
