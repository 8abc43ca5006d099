//! Seams to the platform: camera, barcode decoder, identity, document store
//! and the attendance endpoint.

pub mod attendance_api;
pub mod camera;
pub mod decoder;
pub mod identity;
pub mod store;

pub use attendance_api::AttendanceApi;
pub use camera::{CameraFrame, FrameSink, FrameSource};
pub use decoder::{BarcodeDecoder, DecodeError};
pub use identity::{IdentityProvider, SignedInUser};
pub use store::DocumentStore;
