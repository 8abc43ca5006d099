//! Box conversion between detector space and frame space.

use passport_model::{BoundingBox, Rotation};

/// Map a detector-space box into the raw sensor plane of a `width` x
/// `height` frame: rotate the four corners, take their bounding box, clamp.
pub fn map_box_to_frame(
    bbox: BoundingBox,
    rotation: Rotation,
    width: i32,
    height: i32,
) -> BoundingBox {
    let corners = bbox.corners().map(|p| rotation.to_frame(p, width, height));
    BoundingBox::enclosing(&corners)
        .unwrap_or(bbox)
        .clamp_to(width, height)
}

/// Inverse of [`map_box_to_frame`], clamped to the detector image.
pub fn map_box_to_detector(
    bbox: BoundingBox,
    rotation: Rotation,
    width: i32,
    height: i32,
) -> BoundingBox {
    let corners =
        bbox.corners().map(|p| rotation.to_detector(p, width, height));
    let (dw, dh) = rotation.detector_size(width, height);
    BoundingBox::enclosing(&corners)
        .unwrap_or(bbox)
        .clamp_to(dw, dh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use passport_model::Point;
    use std::collections::HashSet;

    const W: i32 = 640;
    const H: i32 = 480;

    #[test]
    fn corners_map_one_to_one() {
        let bbox = BoundingBox::new(40, 60, 200, 220);
        for rotation in Rotation::ALL {
            let mapped: HashSet<Point> = bbox
                .corners()
                .iter()
                .map(|p| rotation.to_frame(*p, W, H))
                .collect();
            assert_eq!(mapped.len(), 4, "{rotation:?}");
        }
    }

    #[test]
    fn round_trip_restores_box() {
        let bbox = BoundingBox::new(40, 60, 200, 220);
        for rotation in Rotation::ALL {
            let frame = map_box_to_frame(bbox, rotation, W, H);
            assert!(!frame.is_degenerate());
            assert_eq!(
                map_box_to_detector(frame, rotation, W, H),
                bbox,
                "{rotation:?}"
            );
        }
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        let bbox = BoundingBox::new(51, 100, 251, 300);
        let frame = map_box_to_frame(bbox, Rotation::Deg90, 400, 300);
        assert_eq!(frame, BoundingBox::new(100, 48, 300, 248));
    }

    #[test]
    fn out_of_frame_boxes_are_clamped() {
        let bbox = BoundingBox::new(-30, -30, 900, 900);
        let frame = map_box_to_frame(bbox, Rotation::Deg0, W, H);
        assert_eq!(frame, BoundingBox::new(0, 0, W - 1, H - 1));
    }

    #[test]
    fn half_turn_mirrors_both_axes() {
        let bbox = BoundingBox::new(51, 100, 251, 200);
        let frame = map_box_to_frame(bbox, Rotation::Deg180, 400, 300);
        assert_eq!(frame, BoundingBox::new(148, 99, 348, 199));
        assert_eq!(map_box_to_detector(frame, Rotation::Deg180, 400, 300), bbox);
    }

    #[test]
    fn three_quarter_turn_swaps_axes_the_other_way() {
        // Detector image is 300 x 400 for a 400 x 300 sensor.
        let bbox = BoundingBox::new(51, 100, 251, 300);
        let frame = map_box_to_frame(bbox, Rotation::Deg270, 400, 300);
        assert_eq!(frame, BoundingBox::new(99, 51, 299, 251));
        assert_eq!(map_box_to_detector(frame, Rotation::Deg270, 400, 300), bbox);
    }
}
