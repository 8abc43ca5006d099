//! Luminance plane views.

use crate::error::{ModelError, Result};

/// Borrowed view over one camera frame's 8-bit luminance plane.
///
/// Sample reads never panic: coordinates outside the frame or indices past
/// the end of the buffer read as `0`.
#[derive(Debug, Clone, Copy)]
pub struct LumaFrame<'a> {
    data: &'a [u8],
    width: i32,
    height: i32,
    row_stride: usize,
    pixel_stride: usize,
}

impl<'a> LumaFrame<'a> {
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        row_stride: usize,
        pixel_stride: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ModelError::InvalidFrame(format!(
                "empty frame {width}x{height}"
            )));
        }
        if pixel_stride == 0 || row_stride < width as usize * pixel_stride {
            return Err(ModelError::InvalidFrame(format!(
                "row stride {row_stride} too small for width {width} at pixel stride {pixel_stride}"
            )));
        }
        let width = i32::try_from(width).map_err(|_| {
            ModelError::InvalidFrame(format!("width {width} out of range"))
        })?;
        let height = i32::try_from(height).map_err(|_| {
            ModelError::InvalidFrame(format!("height {height} out of range"))
        })?;
        Ok(Self {
            data,
            width,
            height,
            row_stride,
            pixel_stride,
        })
    }

    /// Tightly packed plane: `row_stride == width`, `pixel_stride == 1`.
    pub fn packed(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        Self::new(data, width, height, width as usize, 1)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }

    #[inline]
    pub fn luma(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        let index = y as usize * self.row_stride + x as usize * self.pixel_stride;
        self.data.get(index).copied().unwrap_or(0)
    }
}

/// Owned luminance plane as handed over by a camera frame source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedLumaFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub row_stride: usize,
    pub pixel_stride: usize,
}

impl OwnedLumaFrame {
    /// Packed frame filled with one luma value.
    pub fn filled(width: u32, height: u32, luma: u8) -> Self {
        Self {
            data: vec![luma; width as usize * height as usize],
            width,
            height,
            row_stride: width as usize,
            pixel_stride: 1,
        }
    }

    /// Packed frame with each pixel produced by `f(x, y)`.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> u8,
    ) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
            row_stride: width as usize,
            pixel_stride: 1,
        }
    }

    pub fn view(&self) -> Result<LumaFrame<'_>> {
        LumaFrame::new(
            &self.data,
            self.width,
            self.height,
            self.row_stride,
            self.pixel_stride,
        )
    }
}
