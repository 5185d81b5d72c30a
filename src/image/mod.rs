//! Owned image buffers.
//!
//! `Image` stores `f32` samples in row-major, channel-interleaved order:
//! the sample for channel `c` of pixel `(x, y)` lives at
//! `(y * width + x) * depth + c`. Depth is 1 for grayscale and 3 for color.
//! Every pipeline stage returns a fresh `Image`; nothing is modified in place
//! across stage boundaries.

use crate::util::{BandMixError, BandMixResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Owned floating-point image with 1 or 3 interleaved channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    data: Vec<f32>,
    width: usize,
    height: usize,
    depth: usize,
}

impl Image {
    /// Creates an image from interleaved samples.
    pub fn new(data: Vec<f32>, width: usize, height: usize, depth: usize) -> BandMixResult<Self> {
        let needed = sample_count(width, height, depth)?;
        if data.len() != needed {
            return Err(BandMixError::BufferLength {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            depth,
        })
    }

    /// Creates an image from 8-bit samples.
    pub fn from_u8(data: &[u8], width: usize, height: usize, depth: usize) -> BandMixResult<Self> {
        Self::new(data.iter().map(|&v| f32::from(v)).collect(), width, height, depth)
    }

    /// Creates an image with every sample set to `value`.
    pub fn filled(width: usize, height: usize, depth: usize, value: f32) -> BandMixResult<Self> {
        let needed = sample_count(width, height, depth)?;
        Ok(Self {
            data: vec![value; needed],
            width,
            height,
            depth,
        })
    }

    /// Creates an image by evaluating `f(x, y, c)` for every sample.
    pub fn from_fn<F>(width: usize, height: usize, depth: usize, mut f: F) -> BandMixResult<Self>
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        let needed = sample_count(width, height, depth)?;
        let mut data = Vec::with_capacity(needed);
        for y in 0..height {
            for x in 0..width {
                for c in 0..depth {
                    data.push(f(x, y, c));
                }
            }
        }
        Ok(Self {
            data,
            width,
            height,
            depth,
        })
    }

    /// Allocates a zeroed image with the same shape as `self`.
    pub(crate) fn zeros_like(&self) -> Self {
        Self {
            data: vec![0.0; self.data.len()],
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of interleaved channels (1 or 3).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `(height, width, depth)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.depth)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Number of samples in one row (`width * depth`).
    pub fn row_len(&self) -> usize {
        self.width * self.depth
    }

    /// Returns the interleaved samples of row `y`.
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.row_len();
        self.data.get(start..start + self.row_len())
    }

    /// Returns the sample at `(x, y)` in channel `c` if it is within bounds.
    pub fn get(&self, x: usize, y: usize, c: usize) -> Option<f32> {
        if x >= self.width || y >= self.height || c >= self.depth {
            return None;
        }
        self.data.get((y * self.width + x) * self.depth + c).copied()
    }

    /// Returns `(min, max)` over all samples.
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Fails with `DimensionMismatch` unless `other` has the same shape.
    pub fn ensure_same_shape(&self, other: &Image, context: &'static str) -> BandMixResult<()> {
        if self.shape() != other.shape() {
            return Err(BandMixError::DimensionMismatch {
                context,
                expected: self.shape(),
                got: other.shape(),
            });
        }
        Ok(())
    }

    /// Returns `self - other` sample by sample.
    pub fn sub(&self, other: &Image) -> BandMixResult<Image> {
        self.zip_map(other, "image subtraction", |a, b| a - b)
    }

    /// Returns `self + other` sample by sample.
    pub fn add(&self, other: &Image) -> BandMixResult<Image> {
        self.zip_map(other, "image addition", |a, b| a + b)
    }

    /// Returns a copy with every sample multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Image {
        self.map(|v| v * factor)
    }

    /// Returns a copy with every sample clamped to `[lo, hi]`.
    pub fn clamped(&self, lo: f32, hi: f32) -> Image {
        self.map(|v| v.clamp(lo, hi))
    }

    /// Rescales samples linearly so that the minimum maps to 0 and the
    /// maximum to 1. A constant image maps to all zeros.
    pub fn normalized_min_max(&self) -> Image {
        let (lo, hi) = self.min_max();
        let range = hi - lo;
        if range <= 0.0 || !range.is_finite() {
            return self.zeros_like();
        }
        let scale = 1.0 / range;
        self.map(|v| (v - lo) * scale)
    }

    /// Converts to 8-bit samples, clamping to `[0, 255]` and rounding.
    pub fn to_u8_saturating(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| v.clamp(0.0, 255.0).round() as u8)
            .collect()
    }

    pub(crate) fn map<F: Fn(f32) -> f32>(&self, f: F) -> Image {
        Image {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }

    fn zip_map<F: Fn(f32, f32) -> f32>(
        &self,
        other: &Image,
        context: &'static str,
        f: F,
    ) -> BandMixResult<Image> {
        self.ensure_same_shape(other, context)?;
        Ok(Image {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            width: self.width,
            height: self.height,
            depth: self.depth,
        })
    }

    /// Embeds the image in a zero-filled canvas grown by `pad_y` rows and
    /// `pad_x` columns, placing the original at offset `(off_y, off_x)`.
    pub(crate) fn zero_padded(
        &self,
        pad_y: usize,
        pad_x: usize,
        off_y: usize,
        off_x: usize,
    ) -> Image {
        let width = self.width + pad_x;
        let height = self.height + pad_y;
        let depth = self.depth;
        let mut data = vec![0.0f32; width * height * depth];
        let src_len = self.row_len();
        for y in 0..self.height {
            let dst_start = ((y + off_y) * width + off_x) * depth;
            let src_start = y * src_len;
            data[dst_start..dst_start + src_len]
                .copy_from_slice(&self.data[src_start..src_start + src_len]);
        }
        Image {
            data,
            width,
            height,
            depth,
        }
    }
}

fn sample_count(width: usize, height: usize, depth: usize) -> BandMixResult<usize> {
    if width == 0 || height == 0 {
        return Err(BandMixError::InvalidDimensions { width, height });
    }
    if depth != 1 && depth != 3 {
        return Err(BandMixError::InvalidDepth { depth });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(depth))
        .ok_or(BandMixError::InvalidDimensions { width, height })
}
