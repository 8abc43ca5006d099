use std::fmt;
use std::time::{Duration, Instant};

use passport_model::{
    BarcodeFormat, Detection, LumaFrame, Rotation, extract_event_id,
};
use tracing::{debug, info};

use super::hint::HintBoard;
use crate::constants::scan as text;
use crate::vision::{AuthenticityVerifier, Rejection, Verdict, VerifierConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scan-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanPhase {
    #[default]
    Idle,
    /// Camera running, frames are being judged.
    Active { session: SessionId },
    /// A frame passed; later completions from this session are ignored.
    Locked { session: SessionId },
}

/// Tag attached to a frame when it is handed to the decoder. The completion
/// is only honoured if the same session is still Active when it comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanTicket {
    session: SessionId,
}

impl ScanTicket {
    pub fn session(&self) -> SessionId {
        self.session
    }
}

/// Payload of a frame that passed both authenticity checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedScan {
    pub session: SessionId,
    pub raw_value: String,
    /// Extracted, not yet validated.
    pub event_id: String,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Stale completion: the session ended or already locked.
    Ignored,
    /// No QR with both a payload and a box.
    NoCode,
    Rejected(Rejection),
    Accepted(ValidatedScan),
}

/// Idle / Active / Locked scan session with hint text.
#[derive(Debug, Clone)]
pub struct ScanCoordinator {
    phase: ScanPhase,
    next_session: u64,
    verifier: AuthenticityVerifier,
    hints: HintBoard,
}

impl Default for ScanCoordinator {
    fn default() -> Self {
        Self::new(
            VerifierConfig::default(),
            Duration::from_millis(text::HINT_RESET_MS),
        )
    }
}

impl ScanCoordinator {
    pub fn new(verifier: VerifierConfig, hint_reset: Duration) -> Self {
        Self {
            phase: ScanPhase::Idle,
            next_session: 1,
            verifier: AuthenticityVerifier::new(verifier),
            hints: HintBoard::new(hint_reset),
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, ScanPhase::Active { .. })
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.phase, ScanPhase::Locked { .. })
    }

    pub fn hints(&self) -> &HintBoard {
        &self.hints
    }

    /// Hint text as rendered, including the screen-scan notice.
    pub fn hint_display(&self) -> String {
        self.hints.display()
    }

    /// Open a session. Already Active keeps the running session; Idle or
    /// Locked opens a fresh one, so completions from a locked session stay
    /// ignored.
    pub fn start(&mut self) -> ScanTicket {
        if let ScanPhase::Active { session } = self.phase {
            debug!(%session, "Scan session already active");
            return ScanTicket { session };
        }

        let session = SessionId(self.next_session);
        self.next_session += 1;
        self.phase = ScanPhase::Active { session };
        self.hints.set_steady(text::IDLE_PROMPT);
        info!(%session, "Scan session started");
        ScanTicket { session }
    }

    /// Close the session. Returns true if one was open.
    pub fn stop(&mut self) -> bool {
        let was_running = self.phase != ScanPhase::Idle;
        if was_running {
            info!(phase = ?self.phase, "Scan session stopped");
        }
        self.phase = ScanPhase::Idle;
        self.hints.set_steady(text::STOPPED_PROMPT);
        was_running
    }

    /// Ticket for a frame about to be decoded, if a session is Active.
    pub fn ticket(&self) -> Option<ScanTicket> {
        match self.phase {
            ScanPhase::Active { session } => Some(ScanTicket { session }),
            _ => None,
        }
    }

    /// Judge a decoder completion. State is checked here, at consumption,
    /// not when the frame was issued.
    pub fn on_decoded(
        &mut self,
        ticket: ScanTicket,
        frame: &LumaFrame<'_>,
        detections: &[Detection],
        rotation: Rotation,
        now: Instant,
    ) -> ScanOutcome {
        if self.phase != (ScanPhase::Active { session: ticket.session }) {
            debug!(
                ticket = %ticket.session,
                phase = ?self.phase,
                "Dropping stale decode completion"
            );
            return ScanOutcome::Ignored;
        }

        let Some((raw_value, detector_box)) = detections
            .iter()
            .find(|d| d.format == BarcodeFormat::QrCode)
            .and_then(Detection::qr_parts)
        else {
            return ScanOutcome::NoCode;
        };

        let verdict = self.verifier.verify(frame, detector_box, rotation);
        if let Some(rejection) = verdict.rejection() {
            self.hints.set_transient(rejection.hint(), now);
            debug!(?rejection, "Scan rejected");
            return ScanOutcome::Rejected(rejection);
        }

        // Lock before anything asynchronous can observe the result.
        self.phase = ScanPhase::Locked {
            session: ticket.session,
        };
        let event_id = extract_event_id(raw_value).to_owned();
        info!(session = %ticket.session, %event_id, "Scan accepted");

        ScanOutcome::Accepted(ValidatedScan {
            session: ticket.session,
            raw_value: raw_value.to_owned(),
            event_id,
            verdict,
        })
    }

    /// Revert a timed-out hint. Returns true if the hint changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_active() {
            return false;
        }
        self.hints.tick(now)
    }
}
