//! Print grain inside the code.
//!
//! Only bright, near-flat samples are considered: paper between modules.
//! Toner on paper leaves small luma variation there; a screen or a glossy
//! reprint is either perfectly flat or dominated by hard edges.

use passport_model::{BoundingBox, LumaFrame};

use super::config::VerifierConfig;
use super::stats::RunningStats;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextureReport {
    pub passed: bool,
    pub samples: u32,
    pub variance: f64,
    /// Mean of `|l - (right + down) / 2|` over accepted samples.
    pub mean_abs_deviation: f64,
}

pub fn check(
    frame: &LumaFrame<'_>,
    bbox: BoundingBox,
    cfg: &VerifierConfig,
) -> TextureReport {
    let (width, height) = (frame.width(), frame.height());
    let bbox = bbox.clamp_to(width, height);
    if bbox.is_degenerate() {
        return TextureReport::default();
    }

    let inset = cfg.margin_for(bbox.width(), bbox.height());
    let region = bbox.expand(-inset);
    if region.is_degenerate() {
        return TextureReport::default();
    }

    let (max_x, max_y) = (width - 1, height - 1);
    let step = cfg.step();
    let mut stats = RunningStats::new();
    let mut deviation = 0.0f64;

    for y in (region.top..=region.bottom).step_by(step) {
        for x in (region.left..=region.right).step_by(step) {
            let luma = frame.luma(x, y);
            if luma < cfg.texture_min_luma {
                continue;
            }
            let l = i32::from(luma);
            let right = i32::from(frame.luma((x + 1).min(max_x), y));
            let down = i32::from(frame.luma(x, (y + 1).min(max_y)));
            let gradient = (l - right).abs() + (l - down).abs();
            if gradient > cfg.texture_max_gradient {
                continue;
            }

            stats.push(f64::from(l));
            deviation += (f64::from(l) - f64::from(right + down) / 2.0).abs();
        }
    }

    let samples = stats.count();
    if samples == 0 {
        return TextureReport::default();
    }
    let variance = stats.variance();
    let mean_abs_deviation = deviation / f64::from(samples);
    let passed = samples >= cfg.texture_min_samples
        && variance >= cfg.texture_min_variance
        && mean_abs_deviation >= cfg.texture_min_deviation;

    TextureReport {
        passed,
        samples,
        variance,
        mean_abs_deviation,
    }
}
