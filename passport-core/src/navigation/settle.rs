use std::time::{Duration, Instant};

use passport_model::{PanelLayout, PanelMode};

use super::easing::EasingKind;

/// Timed interpolation of every panel from where it was released to the
/// resting layout of `target`.
#[derive(Debug, Clone, Copy)]
pub struct SettleAnimation {
    pub from: PanelLayout,
    pub to: PanelLayout,
    /// Mode that was current before this settle began.
    pub previous: PanelMode,
    pub target: PanelMode,
    started: Instant,
    duration: Duration,
    easing: EasingKind,
}

impl SettleAnimation {
    pub fn new(
        from: PanelLayout,
        to: PanelLayout,
        previous: PanelMode,
        target: PanelMode,
        started: Instant,
        duration: Duration,
        easing: EasingKind,
    ) -> Self {
        Self {
            from,
            to,
            previous,
            target,
            started,
            duration,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn sample(&self, now: Instant) -> PanelLayout {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, self.easing.apply(t))
    }
}
