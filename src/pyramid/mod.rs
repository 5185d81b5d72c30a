//! Gaussian and Laplacian stacks.
//!
//! Stacks never change resolution: every level has the shape of the input.
//! `gaussian[0]` is the input and `gaussian[i + 1]` blurs `gaussian[i]`;
//! `laplacian[i] = gaussian[i] - gaussian[i + 1]`. Levels depend on each
//! other and are built sequentially.

use crate::image::Image;
use crate::trace::{trace_event, trace_span};
use crate::util::math::default_radius;
use crate::util::{BandMixError, BandMixResult};

mod blur;

pub use blur::{gaussian_blur, MAX_BLUR_RADIUS};

/// Parameters shared by stack construction and blending.
#[derive(Clone, Debug, PartialEq)]
pub struct StackParams {
    /// Number of blur steps; Gaussian stacks hold `levels + 1` images.
    pub levels: usize,
    /// Gaussian width of each blur step.
    pub sigma: f32,
    /// Truncation radius of the blur in pixels.
    pub radius: usize,
}

impl Default for StackParams {
    fn default() -> Self {
        Self::new(5, 16.0)
    }
}

impl StackParams {
    /// Uses the default truncation radius `floor(4 * sigma + 0.5)`.
    pub fn new(levels: usize, sigma: f32) -> Self {
        Self {
            levels,
            sigma,
            radius: default_radius(sigma),
        }
    }

    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub(crate) fn validate(&self) -> BandMixResult<()> {
        if self.levels == 0 {
            return Err(BandMixError::InvalidParameter {
                field: "levels",
                reason: "must be at least 1",
            });
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(BandMixError::InvalidParameter {
                field: "sigma",
                reason: "must be a positive finite number",
            });
        }
        blur::tap_count(self.radius)?;
        Ok(())
    }
}

/// Progressively blurred copies of an image, finest first.
#[derive(Clone, Debug)]
pub struct GaussianStack {
    levels: Vec<Image>,
}

/// Detail bands between consecutive Gaussian levels.
#[derive(Clone, Debug)]
pub struct LaplacianStack {
    levels: Vec<Image>,
}

impl GaussianStack {
    /// Returns all levels (level 0 is the input).
    pub fn levels(&self) -> &[Image] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Image> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The most blurred level.
    pub fn coarsest(&self) -> Option<&Image> {
        self.levels.last()
    }

    pub fn into_levels(self) -> Vec<Image> {
        self.levels
    }
}

impl LaplacianStack {
    pub fn levels(&self) -> &[Image] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Image> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn into_levels(self) -> Vec<Image> {
        self.levels
    }
}

/// Builds the Gaussian (`levels + 1` images) and Laplacian (`levels`
/// images) stacks of `image`.
pub fn build_stacks(
    image: &Image,
    params: &StackParams,
) -> BandMixResult<(GaussianStack, LaplacianStack)> {
    params.validate()?;
    let _span = trace_span!(
        "build_stacks",
        levels = params.levels,
        sigma = params.sigma,
        radius = params.radius
    )
    .entered();

    let mut gaussian = Vec::with_capacity(params.levels + 1);
    let mut laplacian = Vec::with_capacity(params.levels);
    gaussian.push(image.clone());
    for i in 0..params.levels {
        let next = gaussian_blur(&gaussian[i], params.sigma, params.radius)?;
        laplacian.push(gaussian[i].sub(&next)?);
        gaussian.push(next);
    }

    trace_event!("stacks", gaussian = gaussian.len(), laplacian = laplacian.len());
    Ok((
        GaussianStack { levels: gaussian },
        LaplacianStack { levels: laplacian },
    ))
}

/// Sums every Laplacian level and the coarsest Gaussian level, which
/// recovers `gaussian[0]` up to rounding.
pub fn reconstruct(gaussian: &GaussianStack, laplacian: &LaplacianStack) -> BandMixResult<Image> {
    let coarsest = gaussian.coarsest().ok_or(BandMixError::InvalidParameter {
        field: "levels",
        reason: "gaussian stack is empty",
    })?;
    let mut acc = coarsest.clone();
    for level in laplacian.levels().iter().rev() {
        acc = acc.add(level)?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::{build_stacks, reconstruct, StackParams};
    use crate::image::Image;
    use crate::util::BandMixError;

    #[test]
    fn default_matches_reference_parameters() {
        let p = StackParams::default();
        assert_eq!(p.levels, 5);
        assert_eq!(p.sigma, 16.0);
        assert_eq!(p.radius, 64);
    }

    #[test]
    fn stacks_have_expected_lengths_and_shapes() {
        let img = Image::from_fn(12, 9, 3, |x, y, c| ((x * 31 + y * 17 + c * 5) % 256) as f32)
            .unwrap();
        let params = StackParams::new(3, 1.5);
        let (g, l) = build_stacks(&img, &params).unwrap();
        assert_eq!(g.len(), 4);
        assert_eq!(l.len(), 3);
        assert_eq!(g.level(0), Some(&img));
        for level in g.levels().iter().chain(l.levels()) {
            assert_eq!(level.shape(), img.shape());
        }
        let rebuilt = reconstruct(&g, &l).unwrap();
        for (a, b) in rebuilt.as_slice().iter().zip(img.as_slice()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn rejects_zero_levels() {
        let img = Image::filled(2, 2, 1, 0.0).unwrap();
        let err = build_stacks(&img, &StackParams::new(0, 1.0)).err().unwrap();
        assert_eq!(
            err,
            BandMixError::InvalidParameter {
                field: "levels",
                reason: "must be at least 1",
            }
        );
    }

    #[test]
    fn huge_sigma_reports_radius_instead_of_allocating() {
        let img = Image::filled(4, 4, 1, 10.0).unwrap();
        let err = build_stacks(&img, &StackParams::new(1, 1e30)).err().unwrap();
        assert_eq!(
            err,
            BandMixError::InvalidParameter {
                field: "radius",
                reason: "exceeds the maximum blur radius",
            }
        );
    }
}
