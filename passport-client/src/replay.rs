//! Replay a recorded pointer trace through [`update`] with a synthetic
//! clock and report what the navigation did.

use std::fmt;
use std::time::{Duration, Instant};

use passport_core::navigation::{PointerEvent, PointerPhase};
use passport_model::{PanelMode, Viewport};
use serde::Deserialize;

use crate::messages::{DomainMessage, Effect};
use crate::runtime::FRAME_INTERVAL;
use crate::state::{State, StateConfig};
use crate::update::update;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TraceEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    /// Milliseconds since the start of the trace.
    pub t_ms: u64,
}

/// JSON document accepted by `passport replay`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointerTrace {
    #[serde(default)]
    pub viewport: Option<Viewport>,
    /// Whether the event list is scrolled to its end, which enables the
    /// pull-up to the scanner.
    #[serde(default)]
    pub list_at_bottom: bool,
    pub events: Vec<TraceEvent>,
}

impl PointerTrace {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    /// A settle began towards `to`.
    Navigate {
        at_ms: u64,
        from: PanelMode,
        to: PanelMode,
    },
    Settled { at_ms: u64, mode: PanelMode },
    Camera { at_ms: u64, on: bool },
}

impl fmt::Display for ReplayStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate { at_ms, from, to } => {
                write!(f, "{at_ms:>6}ms  {from} -> {to}")
            }
            Self::Settled { at_ms, mode } => {
                write!(f, "{at_ms:>6}ms  settled on {mode}")
            }
            Self::Camera { at_ms, on } => write!(
                f,
                "{at_ms:>6}ms  camera {}",
                if *on { "on" } else { "off" }
            ),
        }
    }
}

struct Replayer {
    state: State,
    t0: Instant,
    clock_ms: u64,
    steps: Vec<ReplayStep>,
}

impl Replayer {
    fn apply(&mut self, message: DomainMessage, at_ms: u64) {
        let before = self.state.navigation.mode();
        let settling = self.state.navigation.is_settling();
        let effects =
            update(&mut self.state, message, self.t0 + Duration::from_millis(at_ms));

        let after = self.state.navigation.mode();
        if after != before || (!settling && self.state.navigation.is_settling()) {
            self.steps.push(ReplayStep::Navigate {
                at_ms,
                from: before,
                to: after,
            });
        }
        if settling && !self.state.navigation.is_settling() {
            self.steps.push(ReplayStep::Settled { at_ms, mode: after });
        }
        for effect in effects {
            match effect {
                Effect::StartCamera(_) => {
                    self.steps.push(ReplayStep::Camera { at_ms, on: true })
                }
                Effect::StopCamera => {
                    self.steps.push(ReplayStep::Camera { at_ms, on: false })
                }
                _ => {}
            }
        }
    }

    /// Animation frames up to and including `until_ms`.
    fn tick_until(&mut self, until_ms: u64) {
        let frame = FRAME_INTERVAL.as_millis() as u64;
        while self.clock_ms + frame <= until_ms {
            self.clock_ms += frame;
            self.apply(DomainMessage::Tick, self.clock_ms);
        }
    }
}

/// Feed `trace` through a fresh state and return the navigation steps in
/// order. Events are applied in the order given; timestamps only drive the
/// animation clock.
pub fn replay(trace: &PointerTrace, mut config: StateConfig) -> Vec<ReplayStep> {
    if let Some(viewport) = trace.viewport {
        config.viewport = viewport;
    }
    let settle_ms = config.navigation.settle_duration.as_millis() as u64;
    let mut replayer = Replayer {
        state: State::new(config),
        t0: Instant::now(),
        clock_ms: 0,
        steps: Vec::new(),
    };
    replayer
        .state
        .navigation
        .set_list_at_bottom(trace.list_at_bottom);

    for event in &trace.events {
        replayer.tick_until(event.t_ms);
        let at = replayer.t0 + Duration::from_millis(event.t_ms);
        let pointer = PointerEvent::new(event.phase, event.x, event.y, at);
        replayer.apply(DomainMessage::Pointer(pointer), event.t_ms);
        replayer.clock_ms = replayer.clock_ms.max(event.t_ms);
    }

    let last = trace.events.last().map(|e| e.t_ms).unwrap_or(0);
    let frame = FRAME_INTERVAL.as_millis() as u64;
    replayer.tick_until(last + settle_ms + frame);
    replayer.steps
}

/// Convenience for tests and the CLI: pointer trace from `(phase, x, y, t)`.
pub fn trace_of(
    events: &[(PointerPhase, f32, f32, u64)],
    list_at_bottom: bool,
) -> PointerTrace {
    PointerTrace {
        viewport: None,
        list_at_bottom,
        events: events
            .iter()
            .map(|&(phase, x, y, t_ms)| TraceEvent { phase, x, y, t_ms })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passport_core::navigation::PointerPhase::{Down, Move, Up};

    fn config() -> StateConfig {
        StateConfig {
            viewport: Viewport::new(400.0, 800.0),
            navigation: Default::default(),
            verifier: Default::default(),
            hint_reset: Duration::from_millis(2_500),
            account_url: None,
        }
    }

    #[test]
    fn swipe_left_commits_to_leaderboard() {
        let trace = trace_of(
            &[
                (Down, 300.0, 400.0, 0),
                (Move, 260.0, 402.0, 16),
                (Move, 180.0, 404.0, 32),
                (Up, 150.0, 404.0, 48),
            ],
            false,
        );
        let steps = replay(&trace, config());
        assert_eq!(
            steps,
            vec![
                ReplayStep::Navigate {
                    at_ms: 48,
                    from: PanelMode::List,
                    to: PanelMode::Leaderboard
                },
                ReplayStep::Settled {
                    at_ms: 352,
                    mode: PanelMode::Leaderboard
                },
            ]
        );
    }

    #[test]
    fn pull_up_at_list_end_opens_scanner() {
        let trace = trace_of(
            &[
                (Down, 200.0, 600.0, 0),
                (Move, 200.0, 560.0, 16),
                (Move, 200.0, 450.0, 32),
                (Up, 200.0, 450.0, 48),
            ],
            true,
        );
        let steps = replay(&trace, config());
        assert_eq!(steps.len(), 3, "{steps:?}");
        assert!(matches!(
            steps[0],
            ReplayStep::Navigate { to: PanelMode::Scanner, .. }
        ));
        assert!(matches!(steps[2], ReplayStep::Camera { on: true, .. }));
        assert_eq!(steps[2].to_string(), "   352ms  camera on");
    }

    #[test]
    fn short_drag_springs_back() {
        let trace = trace_of(
            &[
                (Down, 300.0, 400.0, 0),
                (Move, 250.0, 400.0, 16),
                (Up, 200.0, 400.0, 32),
            ],
            false,
        );
        let steps = replay(&trace, config());
        assert_eq!(
            steps,
            vec![
                ReplayStep::Navigate {
                    at_ms: 32,
                    from: PanelMode::List,
                    to: PanelMode::List
                },
                ReplayStep::Settled {
                    at_ms: 336,
                    mode: PanelMode::List
                },
            ]
        );
    }

    #[test]
    fn parses_json_trace() {
        let trace = PointerTrace::from_json(
            r#"{"list_at_bottom": true,
                "events": [{"phase": "down", "x": 1, "y": 2, "t_ms": 0}]}"#,
        )
        .unwrap();
        assert!(trace.list_at_bottom);
        assert_eq!(trace.events[0].phase, PointerPhase::Down);
    }
}
