//! Seamless blending of two images through their Laplacian stacks.
//!
//! Detail band `i` of each image is weighted by Gaussian level `i + 1` of the
//! mask, so every band is feathered by a mask blurred one step further than
//! the band itself:
//!
//! `out = sum_i la[i] * m[i + 1] / 255 + lb[i] * (1 - m[i + 1] / 255)`
//!
//! The mask is conventionally in `[0, 255]`, 255 selecting image A.

use crate::image::Image;
use crate::pyramid::{build_stacks, StackParams};
use crate::trace::{trace_event, trace_span};
use crate::util::{BandMixError, BandMixResult};

/// Output scaling applied to the summed bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Normalization {
    /// Min-max rescale to `[0, 1]`.
    MinMax,
    /// Leave samples in their natural range.
    None,
}

/// Blending configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendConfig {
    pub stack: StackParams,
    pub normalization: Normalization,
    /// Also add the mask-weighted coarsest Gaussian level, turning the band
    /// sum into a full reconstruction.
    pub include_residual: bool,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            stack: StackParams::default(),
            normalization: Normalization::MinMax,
            include_residual: false,
        }
    }
}

/// Blends `image_a` and `image_b` under `mask`.
///
/// The images must share a shape. The mask must match their width and
/// height and have depth 1 (shared by all channels) or the image depth.
pub fn blend(
    image_a: &Image,
    image_b: &Image,
    mask: &Image,
    cfg: &BlendConfig,
) -> BandMixResult<Image> {
    image_a.ensure_same_shape(image_b, "blend inputs")?;
    check_mask(image_a, mask)?;
    let levels = cfg.stack.levels;
    let _span = trace_span!("blend", levels = levels, sigma = cfg.stack.sigma).entered();

    let (gauss_a, lap_a) = build_stacks(image_a, &cfg.stack)?;
    let (gauss_b, lap_b) = build_stacks(image_b, &cfg.stack)?;
    let (gauss_m, _) = build_stacks(mask, &cfg.stack)?;

    let mut out = image_a.zeros_like();
    for i in 0..levels {
        accumulate(
            &mut out,
            &lap_a.levels()[i],
            &lap_b.levels()[i],
            &gauss_m.levels()[i + 1],
        );
    }
    if cfg.include_residual {
        accumulate(
            &mut out,
            &gauss_a.levels()[levels],
            &gauss_b.levels()[levels],
            &gauss_m.levels()[levels],
        );
    }

    let (min, max) = out.min_max();
    trace_event!("blended", min = min, max = max);
    Ok(match cfg.normalization {
        Normalization::MinMax => out.normalized_min_max(),
        Normalization::None => out,
    })
}

fn check_mask(image: &Image, mask: &Image) -> BandMixResult<()> {
    let same_plane = mask.width() == image.width() && mask.height() == image.height();
    let depth_ok = mask.depth() == 1 || mask.depth() == image.depth();
    if !same_plane || !depth_ok {
        return Err(BandMixError::DimensionMismatch {
            context: "blend mask",
            expected: image.shape(),
            got: mask.shape(),
        });
    }
    Ok(())
}

/// `out += a * m / 255 + b * (1 - m / 255)`, broadcasting a one-channel mask.
fn accumulate(out: &mut Image, a: &Image, b: &Image, mask: &Image) {
    let depth = out.depth();
    let mask_depth = mask.depth();
    let m = mask.as_slice();
    let samples = out
        .as_mut_slice()
        .iter_mut()
        .zip(a.as_slice().iter().zip(b.as_slice()));
    for (idx, (dst, (&va, &vb))) in samples.enumerate() {
        let mi = if mask_depth == 1 { idx / depth } else { idx };
        let w = m[mi] / 255.0;
        *dst += va * w + vb * (1.0 - w);
    }
}
