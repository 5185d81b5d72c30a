//! Filter kernels.
//!
//! A `Kernel` is an immutable, row-major matrix of `f32` weights. Shape and
//! finiteness are checked once at construction, so the filter engine can
//! assume a well-formed kernel.

use crate::util::{BandMixError, BandMixResult};

mod gaussian;

/// Largest side length of a synthesized Gaussian kernel.
pub const MAX_KERNEL_SIDE: usize = 1024;

/// Rectangular matrix of filter weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
    height: usize,
    width: usize,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    pub fn new(weights: Vec<f32>, height: usize, width: usize) -> BandMixResult<Self> {
        if height == 0 || width == 0 {
            return Err(BandMixError::InvalidKernel {
                reason: "kernel has no rows or no columns",
            });
        }
        let needed = height
            .checked_mul(width)
            .ok_or(BandMixError::InvalidKernel {
                reason: "kernel size overflows",
            })?;
        if weights.len() != needed {
            return Err(BandMixError::InvalidKernel {
                reason: "weight count does not match kernel shape",
            });
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(BandMixError::InvalidKernel {
                reason: "kernel weights must be finite",
            });
        }
        Ok(Self {
            weights,
            height,
            width,
        })
    }

    /// Creates a kernel from nested rows, rejecting empty or ragged input.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> BandMixResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(BandMixError::InvalidKernel {
                reason: "kernel rows have different lengths",
            });
        }
        let weights = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::new(weights, height, width)
    }

    /// The 1x1 kernel `[[1]]`.
    pub fn identity() -> Self {
        Self {
            weights: vec![1.0],
            height: 1,
            width: 1,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Returns the weight at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.weights.get(row * self.width + col).copied()
    }

    /// Sum of all weights, accumulated in `f64`.
    pub fn sum(&self) -> f64 {
        self.weights.iter().map(|&w| f64::from(w)).sum()
    }

    /// Returns a copy rotated by 180 degrees (flipped along both axes).
    pub fn flipped(&self) -> Kernel {
        let mut weights = self.weights.clone();
        weights.reverse();
        Kernel {
            weights,
            height: self.height,
            width: self.width,
        }
    }
}
