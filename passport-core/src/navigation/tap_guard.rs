use std::time::{Duration, Instant};

/// Single-scalar window after a gesture ends during which discrete taps
/// are swallowed. Overwritten on every gesture end.
#[derive(Debug, Clone, Copy)]
pub struct TapGuard {
    last_end: Option<Instant>,
    window: Duration,
}

impl TapGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            last_end: None,
            window,
        }
    }

    pub fn record_end(&mut self, at: Instant) {
        self.last_end = Some(at);
    }

    pub fn last_end(&self) -> Option<Instant> {
        self.last_end
    }

    /// `now - last_end < window`. A `now` earlier than the recorded end
    /// counts as zero elapsed.
    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.last_end
            .map(|end| now.saturating_duration_since(end) < self.window)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_edges() {
        let mut guard = TapGuard::new(Duration::from_millis(400));
        let t0 = Instant::now();
        assert!(!guard.is_suppressed(t0));

        guard.record_end(t0);
        assert!(guard.is_suppressed(t0));
        assert!(guard.is_suppressed(t0 + Duration::from_millis(399)));
        assert!(!guard.is_suppressed(t0 + Duration::from_millis(400)));
        assert!(!guard.is_suppressed(t0 + Duration::from_millis(401)));
    }

    #[test]
    fn later_gesture_overwrites_window() {
        let mut guard = TapGuard::new(Duration::from_millis(400));
        let t0 = Instant::now();
        guard.record_end(t0);
        guard.record_end(t0 + Duration::from_millis(1_000));
        assert!(guard.is_suppressed(t0 + Duration::from_millis(1_200)));
    }
}
