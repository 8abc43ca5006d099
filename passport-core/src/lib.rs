//! # Passport Core
//!
//! Engine of the Passport check-in client. The crate is UI-toolkit agnostic:
//! it turns raw pointer events into panel transitions, judges whether a
//! scanned QR code was printed on paper, runs the scan session lifecycle and
//! submits attendance.
//!
//! ## Architecture
//!
//! - [`navigation`]: gesture-driven panel state machine with settle
//!   animation and tap suppression.
//! - [`vision`]: rotation mapping and the white-border / print-texture
//!   authenticity checks over a luma plane.
//! - [`scan`]: Idle/Active/Locked scan session, hint text, latest-frame slot.
//! - [`attendance`]: event id handling and the HTTPS attendance call.
//! - [`traits`]: seams for the camera, barcode decoder, identity provider,
//!   document store and attendance endpoint.
//! - [`infra`]: in-process implementations of those seams.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod attendance;
pub mod constants;
pub mod error;
pub mod infra;
pub mod navigation;
pub mod scan;
pub mod traits;
pub mod vision;

pub use error::{CoreError, Result};

pub use passport_model as model;
