//! # Passport Client
//!
//! Application shell for the Passport check-in client. A single
//! [`update`](update::update) function owns every state transition; the
//! [`runtime`] drives it from a tokio loop and carries out the effects it
//! returns (camera sessions, store reads, attendance calls).
//!
//! - [`messages`]: everything that can happen, and everything `update` asks
//!   for in return.
//! - [`state`]: navigation, scan session, list views and profile form.
//! - [`views`]: list rows, profile form and the floating nav button.
//! - [`replay`]: deterministic pointer-trace replay for tuning gestures.
//! - [`cli`]: the commands behind the `passport` binary.

#![allow(missing_docs)]

pub mod cli;
pub mod messages;
pub mod replay;
pub mod runtime;
pub mod state;
pub mod update;
pub mod views;

pub use messages::{Dialog, DomainMessage, Effect, FrameAck};
pub use runtime::{Runtime, Services};
pub use state::{State, StateConfig};
pub use update::update;
