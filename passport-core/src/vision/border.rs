//! White paper ring around the code.

use passport_model::{BoundingBox, LumaFrame};

use super::config::VerifierConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BorderReport {
    pub passed: bool,
    pub white: u32,
    pub total: u32,
}

impl BorderReport {
    /// White fraction of the ring samples; `0.0` with no samples.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.white) / f64::from(self.total)
        }
    }
}

/// Sample the ring between `bbox` (frame space) and `bbox` grown by the
/// margin. Pixels on or inside the box edges are not part of the ring.
pub fn check(
    frame: &LumaFrame<'_>,
    bbox: BoundingBox,
    cfg: &VerifierConfig,
) -> BorderReport {
    let (width, height) = (frame.width(), frame.height());
    let bbox = bbox.clamp_to(width, height);
    if bbox.is_degenerate() {
        return BorderReport::default();
    }

    let margin = cfg.margin_for(bbox.width(), bbox.height());
    let ring = bbox.expand(margin).clamp_to(width, height);
    let step = cfg.step();

    let mut white = 0u32;
    let mut total = 0u32;
    for y in (ring.top..=ring.bottom).step_by(step) {
        for x in (ring.left..=ring.right).step_by(step) {
            if bbox.contains(x, y) {
                continue;
            }
            total += 1;
            if frame.luma(x, y) >= cfg.white_luma {
                white += 1;
            }
        }
    }

    let mut report = BorderReport {
        passed: false,
        white,
        total,
    };
    report.passed = total > 0 && report.ratio() >= cfg.min_white_ratio;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use passport_model::OwnedLumaFrame;

    fn ring_frame(bbox: BoundingBox, ring: u8, interior: u8) -> OwnedLumaFrame {
        OwnedLumaFrame::from_fn(200, 200, |x, y| {
            if bbox.contains(x as i32, y as i32) {
                interior
            } else {
                ring
            }
        })
    }

    #[test]
    fn white_ring_passes() {
        let bbox = BoundingBox::new(60, 60, 140, 140);
        let owned = ring_frame(bbox, 255, 0);
        let report = check(&owned.view().unwrap(), bbox, &VerifierConfig::default());
        assert!(report.passed);
        assert!(report.total > 0);
        assert_eq!(report.ratio(), 1.0);
    }

    #[test]
    fn black_ring_fails() {
        let bbox = BoundingBox::new(60, 60, 140, 140);
        let owned = ring_frame(bbox, 0, 0);
        let report = check(&owned.view().unwrap(), bbox, &VerifierConfig::default());
        assert!(!report.passed);
        assert_eq!(report.ratio(), 0.0);
    }

    #[test]
    fn half_white_ring_fails() {
        let bbox = BoundingBox::new(60, 60, 140, 140);
        let owned = OwnedLumaFrame::from_fn(200, 200, |x, _| {
            if x < 100 { 255 } else { 10 }
        });
        let report = check(&owned.view().unwrap(), bbox, &VerifierConfig::default());
        assert!(!report.passed);
        assert!(report.ratio() > 0.3 && report.ratio() < 0.7);
    }

    #[test]
    fn box_filling_the_frame_has_no_ring() {
        let owned = OwnedLumaFrame::filled(200, 200, 255);
        let report = check(
            &owned.view().unwrap(),
            BoundingBox::new(0, 0, 199, 199),
            &VerifierConfig::default(),
        );
        assert_eq!(report.total, 0);
        assert!(!report.passed);
    }

    #[test]
    fn degenerate_box_fails_closed() {
        let owned = OwnedLumaFrame::filled(200, 200, 255);
        let view = owned.view().unwrap();
        let cfg = VerifierConfig::default();
        assert!(!check(&view, BoundingBox::new(140, 60, 60, 140), &cfg).passed);
        assert!(!check(&view, BoundingBox::new(60, 60, 60, 140), &cfg).passed);
        assert!(!check(&view, BoundingBox::new(300, 300, 400, 400), &cfg).passed);
    }

    /// One-pixel ring around a 4x4 box: 20 samples, every one counted.
    fn unit_ring_config() -> VerifierConfig {
        VerifierConfig {
            sample_step: 1,
            min_margin_px: 1,
            margin_fraction: 0.0,
            ..VerifierConfig::default()
        }
    }

    #[test]
    fn ratio_exactly_at_minimum_passes() {
        let bbox = BoundingBox::new(5, 5, 8, 8);
        let cfg = unit_ring_config();

        // Bottom ring row dark: 14 of 20 white.
        let owned = OwnedLumaFrame::from_fn(20, 20, |_, y| {
            if y == 9 { 0 } else { 255 }
        });
        let report = check(&owned.view().unwrap(), bbox, &cfg);
        assert_eq!((report.white, report.total), (14, 20));
        assert_eq!(report.ratio(), 0.70);
        assert!(report.passed);

        // One more dark sample drops below.
        let owned = OwnedLumaFrame::from_fn(20, 20, |x, y| {
            if y == 9 || (x, y) == (4, 8) { 0 } else { 255 }
        });
        let report = check(&owned.view().unwrap(), bbox, &cfg);
        assert_eq!((report.white, report.total), (13, 20));
        assert!(!report.passed);
    }

    #[test]
    fn white_luma_threshold_is_inclusive() {
        let bbox = BoundingBox::new(5, 5, 8, 8);
        let cfg = unit_ring_config();
        let at_threshold = OwnedLumaFrame::filled(20, 20, cfg.white_luma);
        let report = check(&at_threshold.view().unwrap(), bbox, &cfg);
        assert_eq!(report.white, report.total);

        let below = OwnedLumaFrame::filled(20, 20, cfg.white_luma - 1);
        assert_eq!(check(&below.view().unwrap(), bbox, &cfg).white, 0);
    }
}
