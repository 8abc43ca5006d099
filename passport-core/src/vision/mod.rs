//! Physical-authenticity checks for a decoded QR code.
//!
//! A genuine check-in code is printed on white paper. Two independent
//! heuristics run over the raw luma plane around the decoder's box:
//!
//! - [`border`]: a ring just outside the code must be mostly white.
//! - [`texture`]: flat bright areas inside the code must carry the faint
//!   high-frequency grain of toner on paper, which screens and glossy
//!   reprints lack.
//!
//! Degenerate geometry never errors; it fails the check.

pub mod border;
pub mod config;
pub mod mapping;
pub mod stats;
pub mod texture;
pub mod verifier;

#[cfg(any(test, feature = "testing"))]
pub mod fixtures;

pub use border::BorderReport;
pub use config::VerifierConfig;
pub use mapping::{map_box_to_detector, map_box_to_frame};
pub use stats::RunningStats;
pub use texture::TextureReport;
pub use verifier::{AuthenticityVerifier, Rejection, Verdict};
