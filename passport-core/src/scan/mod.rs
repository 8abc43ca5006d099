//! Scan session lifecycle: camera on/off, per-frame verdicts, hint text.

pub mod coordinator;
pub mod hint;
pub mod slot;

pub use coordinator::{
    ScanCoordinator, ScanOutcome, ScanPhase, ScanTicket, SessionId,
    ValidatedScan,
};
pub use hint::HintBoard;
pub use slot::LatestFrameSlot;
