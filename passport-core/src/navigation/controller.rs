use std::time::Instant;

use passport_model::{PanelLayout, PanelMode, Viewport};
use tracing::{debug, trace};

use super::config::NavigationConfig;
use super::gesture::{
    GestureState, commit_target, exceeds_slop, latch_axis, should_intercept,
};
use super::messages::{PointerEvent, PointerOutcome, PointerPhase, SettleComplete};
use super::placement::place;
use super::settle::SettleAnimation;
use super::tap_guard::TapGuard;

/// Gesture-driven navigation over the four panels.
///
/// All methods take the current time explicitly so the host's clock (or a
/// test clock) drives the settle animation and the tap window.
#[derive(Debug, Clone)]
pub struct NavigationController {
    cfg: NavigationConfig,
    viewport: Viewport,
    mode: PanelMode,
    /// Live pointer sequence, if any.
    gesture: Option<GestureState>,
    settle: Option<SettleAnimation>,
    tap_guard: TapGuard,
    list_at_bottom: bool,
    /// Last computed translations; what the renderer draws.
    layout: PanelLayout,
}

impl NavigationController {
    pub fn new(viewport: Viewport) -> Self {
        Self::new_with_config(viewport, NavigationConfig::default())
    }

    pub fn new_with_config(viewport: Viewport, cfg: NavigationConfig) -> Self {
        let mode = PanelMode::default();
        Self {
            cfg,
            viewport,
            mode,
            gesture: None,
            settle: None,
            tap_guard: TapGuard::new(cfg.tap_suppression),
            list_at_bottom: false,
            layout: place(mode, viewport, 0.0, 0.0),
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.cfg
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn gesture(&self) -> Option<&GestureState> {
        self.gesture.as_ref()
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    pub fn list_at_bottom(&self) -> bool {
        self.list_at_bottom
    }

    pub fn set_list_at_bottom(&mut self, at_bottom: bool) {
        self.list_at_bottom = at_bottom;
    }

    /// Derive the at-bottom flag from the hub list's scroll window.
    pub fn update_list_scroll(
        &mut self,
        first_visible: usize,
        visible_count: usize,
        total: usize,
    ) {
        self.list_at_bottom =
            total > 0 && first_visible + visible_count >= total;
    }

    /// Resize; the resting layout is recomputed unless a drag or settle
    /// owns it.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.settle.is_none()
            && !self.gesture.is_some_and(|g| g.intercepted)
        {
            self.layout = place(self.mode, viewport, 0.0, 0.0);
        }
    }

    /// True while a gesture is being consumed or within the suppression
    /// window after one ended. Discrete tap handlers no-op when set.
    pub fn should_suppress_tap(&self, now: Instant) -> bool {
        self.gesture.is_some_and(|g| g.intercepted)
            || self.tap_guard.is_suppressed(now)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        if self.settle.is_some() {
            return PointerOutcome::PASS_THROUGH;
        }

        match event.phase {
            PointerPhase::Down => {
                self.gesture = Some(GestureState::begin(event.x, event.y));
                PointerOutcome::PASS_THROUGH
            }
            PointerPhase::Move => self.on_move(event),
            PointerPhase::Up | PointerPhase::Cancel => self.on_release(event),
        }
    }

    fn on_move(&mut self, event: PointerEvent) -> PointerOutcome {
        let Some(gesture) = self.gesture.as_mut() else {
            return PointerOutcome::PASS_THROUGH;
        };
        let (dx, dy) = gesture.delta(event.x, event.y);

        if !gesture.intercepted {
            if gesture.started
                || !exceeds_slop(dx, dy, self.cfg.touch_slop_px)
            {
                return PointerOutcome::PASS_THROUGH;
            }
            gesture.started = true;
            gesture.axis = latch_axis(dx, dy);
            gesture.intercepted = should_intercept(
                self.mode,
                gesture.axis,
                dx,
                dy,
                self.list_at_bottom,
            );
            debug!(
                mode = %self.mode,
                axis = ?gesture.axis,
                intercepted = gesture.intercepted,
                dx,
                dy,
                "Drag latched"
            );
            if !gesture.intercepted {
                return PointerOutcome::PASS_THROUGH;
            }
        }

        let cancel_children = !gesture.children_cancelled;
        gesture.children_cancelled = true;
        gesture.track(dx, dy);
        self.layout = place(
            self.mode,
            self.viewport,
            gesture.offset_h,
            gesture.offset_v,
        );
        trace!(h = gesture.offset_h, v = gesture.offset_v, "Drag offset");

        PointerOutcome {
            intercepted: true,
            cancel_children,
        }
    }

    fn on_release(&mut self, event: PointerEvent) -> PointerOutcome {
        let Some(gesture) = self.gesture.take() else {
            return PointerOutcome::PASS_THROUGH;
        };
        if !gesture.intercepted {
            return PointerOutcome::PASS_THROUGH;
        }

        let (dx, dy) = gesture.delta(event.x, event.y);
        let target = commit_target(
            self.mode,
            gesture.axis,
            dx,
            dy,
            self.list_at_bottom,
            self.cfg.commit_threshold_px,
        );
        debug!(
            from = %self.mode,
            to = %target,
            dx,
            dy,
            cancelled = event.phase == PointerPhase::Cancel,
            "Gesture released"
        );

        self.tap_guard.record_end(event.timestamp);
        self.begin_settle(target, event.timestamp);
        PointerOutcome::CONSUMED
    }

    /// Animate to `mode`. Navigating to the current mode settles back to
    /// the resting layout; if already resting, nothing moves.
    pub fn navigate_to(&mut self, mode: PanelMode, now: Instant) {
        // A programmatic jump supersedes any half-finished drag.
        self.gesture = None;
        self.begin_settle(mode, now);
    }

    /// Return to the hub. `false` when already there so the host can fall
    /// back to its own exit handling.
    pub fn back(&mut self, now: Instant) -> bool {
        if self.mode == PanelMode::List {
            return false;
        }
        self.navigate_to(PanelMode::List, now);
        true
    }

    fn begin_settle(&mut self, target: PanelMode, now: Instant) {
        let (from, previous) = match self.settle.take() {
            // Interrupted settle: continue from where the panels are now.
            Some(running) => (running.sample(now), running.previous),
            None => (self.layout, self.mode),
        };
        let to = place(target, self.viewport, 0.0, 0.0);
        self.mode = target;
        self.settle = Some(SettleAnimation::new(
            from,
            to,
            previous,
            target,
            now,
            self.cfg.settle_duration,
            self.cfg.settle_easing,
        ));
    }

    /// Advance the settle animation. Returns the completion on the tick the
    /// panels land.
    pub fn tick(&mut self, now: Instant) -> Option<SettleComplete> {
        let settle = self.settle?;
        self.layout = settle.sample(now);
        if !settle.is_finished(now) {
            return None;
        }

        self.settle = None;
        let done = SettleComplete::new(settle.target, settle.previous);
        debug!(
            mode = %done.mode,
            previous = %done.previous,
            signal = ?done.signal,
            "Settle complete"
        );
        Some(done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::messages::NavigationSignal;
    use passport_model::{DragAxis, Translation};
    use std::time::Duration;

    const VP: Viewport = Viewport {
        width: 400.0,
        height: 800.0,
    };

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    /// Down at (x, y), one move to the far point, release there.
    fn drag(
        nav: &mut NavigationController,
        t0: Instant,
        from: (f32, f32),
        to: (f32, f32),
    ) -> Vec<PointerOutcome> {
        vec![
            nav.handle_pointer(PointerEvent::down(from.0, from.1, t0)),
            nav.handle_pointer(PointerEvent::moved(to.0, to.1, at(t0, 16))),
            nav.handle_pointer(PointerEvent::up(to.0, to.1, at(t0, 32))),
        ]
    }

    fn settle(nav: &mut NavigationController, now: Instant) -> SettleComplete {
        nav.tick(now).expect("settle should complete")
    }

    #[test]
    fn list_always_intercepts_horizontal() {
        for dx in [-25.0, 25.0, -300.0, 300.0] {
            let mut nav = NavigationController::new(VP);
            let t0 = Instant::now();
            nav.handle_pointer(PointerEvent::down(200.0, 400.0, t0));
            let out = nav
                .handle_pointer(PointerEvent::moved(200.0 + dx, 402.0, at(t0, 16)));
            assert!(out.intercepted, "dx = {dx}");
            assert!(out.cancel_children);
        }
    }

    #[test]
    fn within_slop_nothing_latches() {
        let mut nav = NavigationController::new(VP);
        let t0 = Instant::now();
        nav.handle_pointer(PointerEvent::down(200.0, 400.0, t0));
        let out =
            nav.handle_pointer(PointerEvent::moved(224.0, 376.0, at(t0, 16)));
        assert_eq!(out, PointerOutcome::PASS_THROUGH);
        let gesture = nav.gesture().copied().unwrap();
        assert!(!gesture.started);
        assert_eq!(gesture.axis, DragAxis::None);
    }

    #[test]
    fn tie_at_slop_crossing_latches_vertical() {
        let mut nav = NavigationController::new(VP);
        nav.set_list_at_bottom(true);
        let t0 = Instant::now();
        nav.handle_pointer(PointerEvent::down(200.0, 400.0, t0));
        let out =
            nav.handle_pointer(PointerEvent::moved(170.0, 370.0, at(t0, 16)));
        let gesture = nav.gesture().copied().unwrap();
        assert_eq!(gesture.axis, DragAxis::Vertical);
        assert!(out.intercepted);
        assert_eq!(nav.layout().hub, Translation::new(0.0, -30.0));
        assert_eq!(nav.layout().scanner, Translation::new(0.0, 770.0));
    }

    #[test]
    fn commit_threshold_is_exact() {
        let t0 = Instant::now();

        let mut nav = NavigationController::new(VP);
        drag(&mut nav, t0, (200.0, 400.0), (99.0, 400.0));
        assert_eq!(nav.mode(), PanelMode::Leaderboard);
        let done = settle(&mut nav, at(t0, 332));
        assert_eq!(done.mode, PanelMode::Leaderboard);
        assert_eq!(done.signal, None);

        let mut nav = NavigationController::new(VP);
        drag(&mut nav, t0, (200.0, 400.0), (100.0, 400.0));
        assert_eq!(nav.mode(), PanelMode::List);
        settle(&mut nav, at(t0, 332));
        assert_eq!(nav.layout(), place(PanelMode::List, VP, 0.0, 0.0));
    }

    #[test]
    fn cancel_children_fires_once_per_gesture() {
        let mut nav = NavigationController::new(VP);
        let t0 = Instant::now();
        nav.handle_pointer(PointerEvent::down(200.0, 400.0, t0));
        let first =
            nav.handle_pointer(PointerEvent::moved(160.0, 400.0, at(t0, 16)));
        let second =
            nav.handle_pointer(PointerEvent::moved(120.0, 400.0, at(t0, 32)));
        assert!(first.cancel_children);
        assert!(second.intercepted);
        assert!(!second.cancel_children);
        assert_eq!(nav.layout().hub.x, -80.0);
    }

    #[test]
    fn interception_is_decided_once() {
        let mut nav = NavigationController::new(VP);
        nav.navigate_to(PanelMode::Profile, Instant::now());
        let t0 = at(Instant::now(), 1_000);
        nav.tick(t0);

        // Swiping away from the hub on Profile is left to the children,
        // even if the finger later reverses.
        nav.handle_pointer(PointerEvent::down(200.0, 400.0, t0));
        let out =
            nav.handle_pointer(PointerEvent::moved(240.0, 400.0, at(t0, 16)));
        assert!(!out.intercepted);
        let out =
            nav.handle_pointer(PointerEvent::moved(20.0, 400.0, at(t0, 32)));
        assert!(!out.intercepted);
        let out = nav.handle_pointer(PointerEvent::up(20.0, 400.0, at(t0, 48)));
        assert!(!out.intercepted);
        assert_eq!(nav.mode(), PanelMode::Profile);
        assert!(!nav.is_settling());
    }

    #[test]
    fn taps_suppressed_inside_window() {
        let mut nav = NavigationController::new(VP);
        let t0 = Instant::now();
        nav.handle_pointer(PointerEvent::down(200.0, 400.0, t0));
        nav.handle_pointer(PointerEvent::moved(150.0, 400.0, at(t0, 16)));
        assert!(nav.should_suppress_tap(at(t0, 16)));

        let end = at(t0, 50);
        nav.handle_pointer(PointerEvent::up(150.0, 400.0, end));
        assert!(nav.should_suppress_tap(at(t0, 50 + 399)));
        assert!(!nav.should_suppress_tap(at(t0, 50 + 401)));
    }

    #[test]
    fn un_intercepted_release_leaves_tap_window_alone() {
        let mut nav = NavigationController::new(VP);
        let t0 = Instant::now();
        nav.handle_pointer(PointerEvent::down(200.0, 400.0, t0));
        nav.handle_pointer(PointerEvent::up(200.0, 400.0, at(t0, 50)));
        assert!(!nav.should_suppress_tap(at(t0, 60)));
    }

    #[test]
    fn idempotent_settle_keeps_layout() {
        let mut nav = NavigationController::new(VP);
        let before = nav.layout();
        let t0 = Instant::now();
        nav.navigate_to(PanelMode::List, t0);
        assert!(nav.tick(at(t0, 150)).is_none());
        assert_eq!(nav.layout(), before);
        let done = settle(&mut nav, at(t0, 300));
        assert_eq!(done.mode, PanelMode::List);
        assert_eq!(nav.layout(), before);
    }

    #[test]
    fn pointer_events_pass_through_while_settling() {
        let mut nav = NavigationController::new(VP);
        let t0 = Instant::now();
        nav.navigate_to(PanelMode::Leaderboard, t0);

        nav.handle_pointer(PointerEvent::down(200.0, 400.0, at(t0, 10)));
        let out =
            nav.handle_pointer(PointerEvent::moved(350.0, 400.0, at(t0, 20)));
        assert_eq!(out, PointerOutcome::PASS_THROUGH);
        assert!(nav.gesture().is_none());

        settle(&mut nav, at(t0, 300));
        assert_eq!(nav.layout(), place(PanelMode::Leaderboard, VP, 0.0, 0.0));
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut nav = NavigationController::new(VP);
        let t0 = Instant::now();
        let out =
            nav.handle_pointer(PointerEvent::moved(10.0, 400.0, t0));
        assert_eq!(out, PointerOutcome::PASS_THROUGH);
        let out = nav.handle_pointer(PointerEvent::up(10.0, 400.0, t0));
        assert_eq!(out, PointerOutcome::PASS_THROUGH);
        assert_eq!(nav.mode(), PanelMode::List);
    }

    #[test]
    fn scanner_entry_and_exit_signal_the_camera() {
        let mut nav = NavigationController::new(VP);
        nav.update_list_scroll(7, 5, 12);
        assert!(nav.list_at_bottom());
        let t0 = Instant::now();

        drag(&mut nav, t0, (200.0, 700.0), (200.0, 550.0));
        assert_eq!(nav.mode(), PanelMode::Scanner);
        assert!(nav.tick(at(t0, 100)).is_none());
        let done = settle(&mut nav, at(t0, 400));
        assert_eq!(done.signal, Some(NavigationSignal::StartCamera));

        let t1 = at(t0, 1_000);
        drag(&mut nav, t1, (200.0, 100.0), (200.0, 250.0));
        assert_eq!(nav.mode(), PanelMode::List);
        let done = settle(&mut nav, at(t1, 400));
        assert_eq!(done.previous, PanelMode::Scanner);
        assert_eq!(done.signal, Some(NavigationSignal::StopCamera));
    }

    #[test]
    fn pull_up_needs_list_at_bottom() {
        let mut nav = NavigationController::new(VP);
        nav.update_list_scroll(0, 5, 12);
        let t0 = Instant::now();
        let outs = drag(&mut nav, t0, (200.0, 700.0), (200.0, 500.0));
        assert!(outs.iter().all(|o| !o.intercepted));
        assert_eq!(nav.mode(), PanelMode::List);

        nav.update_list_scroll(0, 0, 0);
        assert!(!nav.list_at_bottom());
    }

    #[test]
    fn interrupted_settle_keeps_first_previous_mode() {
        let mut nav = NavigationController::new(VP);
        let t0 = Instant::now();
        nav.navigate_to(PanelMode::Scanner, t0);
        settle(&mut nav, at(t0, 300));

        let t1 = at(t0, 1_000);
        nav.navigate_to(PanelMode::Profile, t1);
        nav.tick(at(t1, 100));
        nav.navigate_to(PanelMode::List, at(t1, 100));
        let done = settle(&mut nav, at(t1, 400));
        assert_eq!(done.mode, PanelMode::List);
        assert_eq!(done.previous, PanelMode::Scanner);
        assert_eq!(done.signal, Some(NavigationSignal::StopCamera));
    }

    #[test]
    fn back_returns_to_hub() {
        let mut nav = NavigationController::new(VP);
        let t0 = Instant::now();
        assert!(!nav.back(t0));
        nav.navigate_to(PanelMode::Leaderboard, t0);
        settle(&mut nav, at(t0, 300));
        assert!(nav.back(at(t0, 400)));
        assert_eq!(nav.mode(), PanelMode::List);
    }

    #[test]
    fn cancelled_release_commits_like_up() {
        let released = |phase: PointerPhase| {
            let mut nav = NavigationController::new(VP);
            let t0 = Instant::now();
            nav.handle_pointer(PointerEvent::down(300.0, 400.0, t0));
            nav.handle_pointer(PointerEvent::moved(150.0, 402.0, at(t0, 16)));
            let out =
                nav.handle_pointer(PointerEvent::new(phase, 150.0, 402.0, at(t0, 32)));
            (out, nav.mode(), nav.should_suppress_tap(at(t0, 32 + 399)))
        };

        let up = released(PointerPhase::Up);
        assert_eq!(up, (PointerOutcome::CONSUMED, PanelMode::Leaderboard, true));
        assert_eq!(released(PointerPhase::Cancel), up);
    }
}
