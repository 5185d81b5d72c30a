//! Low-pass and high-pass frequency bands.
//!
//! The low band is the image convolved with a square Gaussian kernel; the
//! high band is the image minus its low band. Both stay in `f32` and are not
//! clamped, so the high band carries negative samples.

use crate::filter::{filter, FilterMode};
use crate::image::Image;
use crate::kernel::{Kernel, MAX_KERNEL_SIDE};
use crate::trace::{trace_event, trace_span};
use crate::util::{BandMixError, BandMixResult};

/// Validated Gaussian blur parameters for a square kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianParams {
    sigma: f32,
    size: usize,
}

impl GaussianParams {
    /// Checks that `sigma` is positive and finite and `size` lies in
    /// `1..=MAX_KERNEL_SIDE`.
    pub fn new(sigma: f32, size: usize) -> BandMixResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(BandMixError::InvalidParameter {
                field: "blur_sigma",
                reason: "must be a positive finite number",
            });
        }
        if size == 0 {
            return Err(BandMixError::InvalidParameter {
                field: "blur_size",
                reason: "must be at least 1",
            });
        }
        if size > MAX_KERNEL_SIDE {
            return Err(BandMixError::InvalidParameter {
                field: "blur_size",
                reason: "exceeds the maximum kernel size",
            });
        }
        Ok(Self { sigma, size })
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Synthesizes the `size x size` Gaussian kernel.
    pub fn kernel(&self) -> BandMixResult<Kernel> {
        Kernel::gaussian(self.sigma, self.size, self.size)
    }
}

/// Which frequency band to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Low,
    High,
}

impl std::str::FromStr for Band {
    type Err = BandMixError;

    /// Parses `"low"` or `"high"`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("low") {
            Ok(Band::Low)
        } else if s.eq_ignore_ascii_case("high") {
            Ok(Band::High)
        } else {
            Err(BandMixError::InvalidParameter {
                field: "high_low",
                reason: "expected \"high\" or \"low\"",
            })
        }
    }
}

impl Band {
    /// Extracts this band of `image`.
    pub fn apply(self, image: &Image, params: GaussianParams) -> BandMixResult<Image> {
        match self {
            Band::Low => low_pass_with(image, params),
            Band::High => high_pass_with(image, params),
        }
    }
}

/// Low band: convolution with a `size x size` Gaussian of width `sigma`.
pub fn low_pass(image: &Image, sigma: f32, size: usize) -> BandMixResult<Image> {
    low_pass_with(image, GaussianParams::new(sigma, size)?)
}

/// High band: `image - low_pass(image, sigma, size)`.
pub fn high_pass(image: &Image, sigma: f32, size: usize) -> BandMixResult<Image> {
    high_pass_with(image, GaussianParams::new(sigma, size)?)
}

pub fn low_pass_with(image: &Image, params: GaussianParams) -> BandMixResult<Image> {
    let _span = trace_span!("low_pass", sigma = params.sigma, size = params.size).entered();
    let kernel = params.kernel()?;
    Ok(filter(image, &kernel, FilterMode::Convolution))
}

pub fn high_pass_with(image: &Image, params: GaussianParams) -> BandMixResult<Image> {
    let _span = trace_span!("high_pass", sigma = params.sigma, size = params.size).entered();
    let low = low_pass_with(image, params)?;
    let high = image.sub(&low)?;
    let (min, max) = high.min_max();
    trace_event!("high_band", min = min, max = max);
    Ok(high)
}

#[cfg(test)]
mod tests {
    use super::{high_pass, low_pass, Band, GaussianParams};
    use crate::image::Image;
    use crate::util::BandMixError;

    #[test]
    fn low_pass_of_flat_interior_is_flat() {
        let img = Image::filled(9, 9, 1, 50.0).unwrap();
        let low = low_pass(&img, 1.0, 3).unwrap();
        assert!((low.get(4, 4, 0).unwrap() - 50.0).abs() < 1e-4);
        // zero padding darkens the corner
        assert!(low.get(0, 0, 0).unwrap() < 50.0);
    }

    #[test]
    fn high_pass_goes_negative_next_to_bright_pixel() {
        let img = Image::from_fn(5, 5, 1, |x, y, _| if (x, y) == (2, 2) { 255.0 } else { 0.0 })
            .unwrap();
        let high = high_pass(&img, 1.0, 3).unwrap();
        assert!(high.get(2, 2, 0).unwrap() > 0.0);
        assert!(high.get(1, 2, 0).unwrap() < 0.0);
    }

    #[test]
    fn band_parses_case_insensitively() {
        assert_eq!("Low".parse::<Band>().unwrap(), Band::Low);
        assert_eq!("HIGH".parse::<Band>().unwrap(), Band::High);
        assert!("mid".parse::<Band>().is_err());
    }

    #[test]
    fn rejects_zero_size() {
        let img = Image::filled(2, 2, 1, 1.0).unwrap();
        assert_eq!(
            low_pass(&img, 1.0, 0).err().unwrap(),
            BandMixError::InvalidParameter {
                field: "blur_size",
                reason: "must be at least 1",
            }
        );
        assert!(GaussianParams::new(-2.0, 3).is_err());
    }
}
