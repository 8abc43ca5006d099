//! Integer geometry in detector space and frame space.
//!
//! The barcode decoder reports boxes against the display-rotated image
//! (detector space). The luma plane is stored in sensor orientation (frame
//! space). [`Rotation`] converts between the two for a frame of `width` x
//! `height` sensor pixels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned integer rectangle with inclusive edges.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the box has no interior (`right <= left` or `bottom <= top`).
    pub fn is_degenerate(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Corner order: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.left, self.bottom),
            Point::new(self.right, self.bottom),
        ]
    }

    /// Smallest box containing every point.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            bbox.left = bbox.left.min(p.x);
            bbox.top = bbox.top.min(p.y);
            bbox.right = bbox.right.max(p.x);
            bbox.bottom = bbox.bottom.max(p.y);
        }
        Some(bbox)
    }

    /// Clamp to `[0, width-1] x [0, height-1]`.
    pub fn clamp_to(&self, width: i32, height: i32) -> Self {
        let max_x = (width - 1).max(0);
        let max_y = (height - 1).max(0);
        Self {
            left: self.left.clamp(0, max_x),
            top: self.top.clamp(0, max_y),
            right: self.right.clamp(0, max_x),
            bottom: self.bottom.clamp(0, max_y),
        }
    }

    /// Grow (positive) or shrink (negative) every edge by `amount`.
    pub fn expand(&self, amount: i32) -> Self {
        Self {
            left: self.left - amount,
            top: self.top - amount,
            right: self.right + amount,
            bottom: self.bottom + amount,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.left..=self.right).contains(&x)
            && (self.top..=self.bottom).contains(&y)
    }
}

/// Clockwise rotation of the sensor image relative to the display.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Self; 4] =
        [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Normalizes any multiple of 90. Other angles are not produced by camera
    /// stacks and fall back to identity.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            90 => Self::Deg90,
            180 => Self::Deg180,
            270 => Self::Deg270,
            _ => Self::Deg0,
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Detector-space point to frame-space point for a `width` x `height`
    /// sensor frame.
    pub fn to_frame(&self, p: Point, width: i32, height: i32) -> Point {
        match self {
            Self::Deg0 => p,
            Self::Deg90 => Point::new(p.y, height - p.x - 1),
            Self::Deg180 => Point::new(width - p.x - 1, height - p.y - 1),
            Self::Deg270 => Point::new(width - p.y - 1, p.x),
        }
    }

    /// Inverse of [`Rotation::to_frame`].
    pub fn to_detector(&self, p: Point, width: i32, height: i32) -> Point {
        match self {
            Self::Deg0 => p,
            Self::Deg90 => Point::new(height - p.y - 1, p.x),
            Self::Deg180 => Point::new(width - p.x - 1, height - p.y - 1),
            Self::Deg270 => Point::new(p.y, width - p.x - 1),
        }
    }

    /// Size of the detector image for a sensor frame of `width` x `height`.
    pub fn detector_size(&self, width: i32, height: i32) -> (i32, i32) {
        match self {
            Self::Deg0 | Self::Deg180 => (width, height),
            Self::Deg90 | Self::Deg270 => (height, width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_normalize() {
        assert_eq!(Rotation::from_degrees(-90), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(450), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(45), Rotation::Deg0);
    }

    #[test]
    fn point_mapping_inverts() {
        let (w, h) = (640, 480);
        for rotation in Rotation::ALL {
            let (dw, dh) = rotation.detector_size(w, h);
            for p in [
                Point::new(0, 0),
                Point::new(dw - 1, 0),
                Point::new(0, dh - 1),
                Point::new(17, 33),
            ] {
                let frame = rotation.to_frame(p, w, h);
                assert!((0..w).contains(&frame.x), "{rotation:?} {frame:?}");
                assert!((0..h).contains(&frame.y), "{rotation:?} {frame:?}");
                assert_eq!(rotation.to_detector(frame, w, h), p);
            }
        }
    }

    #[test]
    fn clamp_and_degenerate() {
        let b = BoundingBox::new(-5, -5, 700, 10).clamp_to(640, 480);
        assert_eq!(b, BoundingBox::new(0, 0, 639, 10));
        assert!(!b.is_degenerate());
        assert!(BoundingBox::new(10, 10, 10, 40).is_degenerate());
    }
}
