//! Synthetic frames for the vision and scan tests. Enabled for dependents
//! through the `testing` feature.

use passport_model::{BoundingBox, OwnedLumaFrame};

/// Bright paper with toner grain. On even coordinates every sample sits
/// 6 above both its right and down neighbours, and the base level cycles
/// through four values every 2px block.
pub fn grain(x: u32, y: u32) -> u8 {
    let base = 205 + ((x / 2 + y / 2) % 4) * 4;
    let bump = if (x + y) % 2 == 0 { 6 } else { 0 };
    (base + bump) as u8
}

/// White sheet with a grainy code region covering `bbox` (inclusive).
pub fn printed_code(
    width: u32,
    height: u32,
    bbox: BoundingBox,
) -> OwnedLumaFrame {
    OwnedLumaFrame::from_fn(width, height, |x, y| {
        if bbox.contains(x as i32, y as i32) {
            grain(x, y)
        } else {
            255
        }
    })
}

/// Code shown on a screen: grain inside, dark bezel around.
pub fn code_on_screen(
    width: u32,
    height: u32,
    bbox: BoundingBox,
) -> OwnedLumaFrame {
    OwnedLumaFrame::from_fn(width, height, |x, y| {
        if bbox.contains(x as i32, y as i32) {
            grain(x, y)
        } else {
            30
        }
    })
}

/// Glossy reprint: white paper around a perfectly flat code region.
pub fn flat_reprint(
    width: u32,
    height: u32,
    bbox: BoundingBox,
) -> OwnedLumaFrame {
    OwnedLumaFrame::from_fn(width, height, |x, y| {
        if bbox.contains(x as i32, y as i32) {
            235
        } else {
            255
        }
    })
}
