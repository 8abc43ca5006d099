//! Turning a validated scan into a check-in.

pub mod client;
pub mod error;
pub mod flow;

pub use client::HttpAttendanceClient;
pub use error::AttendanceError;
pub use flow::{AttendanceFlow, AttendanceOutcome};
