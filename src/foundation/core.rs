use crate::foundation::error::{StampError, StampResult};
use crate::foundation::math::{demultiply_rgba8_in_place, premultiply_rgba8_in_place};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Premultiplied RGBA8 pixel (r,g,b already multiplied by a).
pub type PremulRgba8 = [u8; 4];

/// Canonical pixel buffer shared by every renderer.
///
/// Pixels are premultiplied RGBA8, row-major, tightly packed. Width and height are always
/// strictly positive.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> StampResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Bitmap where every pixel is `px` (premultiplied).
    pub fn filled(width: u32, height: u32, px: PremulRgba8) -> StampResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..(len / 4) {
            data.extend_from_slice(&px);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> StampResult<Self> {
        let len = byte_len(width, height)?;
        if data.len() != len {
            return Err(StampError::codec(format!(
                "bitmap byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from straight (non-premultiplied) RGBA8, as produced by image decoders.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> StampResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_premul_rgba8(self) -> Vec<u8> {
        self.data
    }

    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        demultiply_rgba8_in_place(&mut out);
        out
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        let idx = self.index(x, y)?;
        let d = &self.data[idx..idx + 4];
        Some([d[0], d[1], d[2], d[3]])
    }

    /// Write one pixel; coordinates outside the bitmap are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: PremulRgba8) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx..idx + 4].copy_from_slice(&px);
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

fn byte_len(width: u32, height: u32) -> StampResult<usize> {
    if width == 0 || height == 0 {
        return Err(StampError::codec(format!(
            "bitmap dimensions must be positive, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| StampError::codec("bitmap size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
