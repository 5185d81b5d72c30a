//! Separable Gaussian kernel synthesis.

use crate::kernel::{Kernel, MAX_KERNEL_SIDE};
use crate::util::math::gaussian_samples;
use crate::util::{BandMixError, BandMixResult};

impl Kernel {
    /// Builds a `height x width` Gaussian kernel with standard deviation
    /// `sigma`.
    ///
    /// The kernel is the outer product of two 1D Gaussians sampled at
    /// `i - (n - 1) / 2`, divided by the product of the two 1D sums, so the
    /// weights sum to one.
    pub fn gaussian(sigma: f32, height: usize, width: usize) -> BandMixResult<Kernel> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(BandMixError::InvalidParameter {
                field: "blur_sigma",
                reason: "must be a positive finite number",
            });
        }
        if height == 0 || width == 0 {
            return Err(BandMixError::InvalidParameter {
                field: "blur_size",
                reason: "must be at least 1",
            });
        }
        if height > MAX_KERNEL_SIDE || width > MAX_KERNEL_SIDE {
            return Err(BandMixError::InvalidParameter {
                field: "blur_size",
                reason: "exceeds the maximum kernel size",
            });
        }

        let sigma = f64::from(sigma);
        let gy = gaussian_samples(sigma, height);
        let gx = gaussian_samples(sigma, width);
        let norm = gy.iter().sum::<f64>() * gx.iter().sum::<f64>();

        let mut weights = Vec::with_capacity(gy.len() * gx.len());
        for &vy in &gy {
            for &vx in &gx {
                weights.push((vy * vx / norm) as f32);
            }
        }
        Kernel::new(weights, height, width)
    }
}
