use std::sync::Arc;

use passport_model::{OwnedLumaFrame, Rotation};

use crate::error::Result;
use crate::scan::LatestFrameSlot;

/// One frame as delivered by the camera: the luminance plane in sensor
/// orientation plus the rotation the display applies to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFrame {
    pub luma: OwnedLumaFrame,
    pub rotation: Rotation,
}

/// Where a running camera pushes frames. Offering a frame releases any
/// older one the worker has not picked up yet.
pub type FrameSink = Arc<LatestFrameSlot<CameraFrame>>;

/// Exclusive handle to the camera device.
pub trait FrameSource: Send {
    /// Begin delivering frames into `sink` until [`FrameSource::stop`].
    fn start(&mut self, sink: FrameSink) -> Result<()>;

    /// Ask the device to stop delivering. Must not block on the capture
    /// thread; a frame already in flight may still land in the sink.
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}
