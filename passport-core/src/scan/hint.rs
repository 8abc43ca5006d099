use std::time::{Duration, Instant};

use crate::constants::scan as text;

/// Scanner hint line with a timed revert to the idle prompt.
#[derive(Debug, Clone)]
pub struct HintBoard {
    message: &'static str,
    revert_at: Option<Instant>,
    reset_after: Duration,
}

impl Default for HintBoard {
    fn default() -> Self {
        Self::new(Duration::from_millis(text::HINT_RESET_MS))
    }
}

impl HintBoard {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            message: text::STOPPED_PROMPT,
            revert_at: None,
            reset_after,
        }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Message plus the screen-scan notice, as rendered under the preview.
    pub fn display(&self) -> String {
        format!("{}\n{}", self.message, text::SCREEN_NOTICE)
    }

    pub fn revert_at(&self) -> Option<Instant> {
        self.revert_at
    }

    /// Show `message` until replaced; cancels any pending revert.
    pub fn set_steady(&mut self, message: &'static str) {
        self.message = message;
        self.revert_at = None;
    }

    /// Show `message` and revert to the idle prompt once `reset_after`
    /// passes without a newer hint.
    pub fn set_transient(&mut self, message: &'static str, now: Instant) {
        self.message = message;
        self.revert_at = Some(now + self.reset_after);
    }

    /// Apply a due revert. Returns true if the text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.revert_at {
            Some(deadline) if now >= deadline => {
                self.revert_at = None;
                let changed = self.message != text::IDLE_PROMPT;
                self.message = text::IDLE_PROMPT;
                changed
            }
            _ => false,
        }
    }
}
