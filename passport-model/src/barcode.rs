use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// Symbologies a decoder may report. Only [`BarcodeFormat::QrCode`] is used
/// for check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeFormat {
    QrCode,
    DataMatrix,
    Aztec,
    Pdf417,
    Code128,
    Ean13,
    Other,
}

/// One barcode reported by the decoder, in detector space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub format: BarcodeFormat,
    pub raw_value: Option<String>,
    pub bounding_box: Option<BoundingBox>,
}

impl Detection {
    pub fn qr(raw_value: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            format: BarcodeFormat::QrCode,
            raw_value: Some(raw_value.into()),
            bounding_box: Some(bounding_box),
        }
    }

    /// Payload and box of a QR detection, if both are present.
    pub fn qr_parts(&self) -> Option<(&str, BoundingBox)> {
        if self.format != BarcodeFormat::QrCode {
            return None;
        }
        Some((self.raw_value.as_deref()?, self.bounding_box?))
    }
}
