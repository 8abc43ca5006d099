use serde::{Deserialize, Serialize};

use crate::constants::verifier as defaults;

/// Thresholds for the white-border and print-texture checks.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Sample every Nth pixel on both axes.
    pub sample_step: i32,
    /// Lower bound for the ring margin and the texture inset (px).
    pub min_margin_px: i32,
    /// Margin/inset as a fraction of the shorter box side.
    pub margin_fraction: f64,
    /// Luma at or above which a ring sample counts as white paper.
    pub white_luma: u8,
    pub min_white_ratio: f64,
    /// Texture samples darker than this are module ink and skipped.
    pub texture_min_luma: u8,
    /// Local gradient ceiling; anything sharper is an edge, not grain.
    pub texture_max_gradient: i32,
    pub texture_min_samples: u32,
    pub texture_min_variance: f64,
    pub texture_min_deviation: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            sample_step: defaults::SAMPLE_STEP,
            min_margin_px: defaults::MIN_MARGIN_PX,
            margin_fraction: defaults::MARGIN_FRACTION,
            white_luma: defaults::WHITE_LUMA,
            min_white_ratio: defaults::MIN_WHITE_RATIO,
            texture_min_luma: defaults::TEXTURE_MIN_LUMA,
            texture_max_gradient: defaults::TEXTURE_MAX_GRADIENT,
            texture_min_samples: defaults::TEXTURE_MIN_SAMPLES,
            texture_min_variance: defaults::TEXTURE_MIN_VARIANCE,
            texture_min_deviation: defaults::TEXTURE_MIN_DEVIATION,
        }
    }
}

impl VerifierConfig {
    /// `max(min_margin_px, floor(fraction * min(w, h)))`.
    pub fn margin_for(&self, box_width: i32, box_height: i32) -> i32 {
        let scaled =
            (f64::from(box_width.min(box_height)) * self.margin_fraction) as i32;
        self.min_margin_px.max(scaled)
    }

    pub(crate) fn step(&self) -> usize {
        self.sample_step.max(1) as usize
    }
}
