use async_trait::async_trait;
use passport_model::Detection;
use thiserror::Error;

use super::camera::CameraFrame;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("decoder unavailable: {0}")]
    Unavailable(String),

    #[error("frame could not be decoded: {0}")]
    Frame(String),
}

/// Barcode detection over a camera frame. Boxes are reported in detector
/// space, i.e. against the frame rotated by [`CameraFrame::rotation`].
#[async_trait]
pub trait BarcodeDecoder: Send + Sync {
    async fn decode(
        &self,
        frame: &CameraFrame,
    ) -> Result<Vec<Detection>, DecodeError>;
}
