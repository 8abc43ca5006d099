use async_trait::async_trait;
use passport_model::Detection;

use crate::traits::{BarcodeDecoder, CameraFrame, DecodeError};

/// Reports the same detections for every frame. Pairs with
/// [`StillFrameSource`](super::StillFrameSource) to replay a known scene.
#[derive(Debug, Clone, Default)]
pub struct StaticDecoder {
    detections: Vec<Detection>,
}

impl StaticDecoder {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

#[async_trait]
impl BarcodeDecoder for StaticDecoder {
    async fn decode(
        &self,
        _frame: &CameraFrame,
    ) -> Result<Vec<Detection>, DecodeError> {
        Ok(self.detections.clone())
    }
}
