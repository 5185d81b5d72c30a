//! Hybrid images: the low band of one image mixed with the high band of
//! another.
//!
//! Output is `clamp(((1 - r) * band_a + r * band_b) * s, 0, 255)` where `r`
//! is the mixin ratio and `s` the scale factor. The clamp is the only
//! saturation in the pipeline.

use crate::band::{Band, GaussianParams};
use crate::image::Image;
use crate::trace::{trace_event, trace_span};
use crate::util::{BandMixError, BandMixResult};

/// Band selection and blur parameters for one hybrid input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandConfig {
    pub band: Band,
    pub params: GaussianParams,
}

/// Fully validated hybrid-image parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HybridConfig {
    pub image_a: BandConfig,
    pub image_b: BandConfig,
    mixin_ratio: f32,
    scale_factor: f32,
}

impl HybridConfig {
    /// Validates `mixin_ratio` in `[0, 1]` and a finite `scale_factor`.
    pub fn new(
        image_a: BandConfig,
        image_b: BandConfig,
        mixin_ratio: f32,
        scale_factor: f32,
    ) -> BandMixResult<Self> {
        if !(0.0..=1.0).contains(&mixin_ratio) {
            return Err(BandMixError::InvalidParameter {
                field: "mixin_ratio",
                reason: "must lie in [0, 1]",
            });
        }
        if !scale_factor.is_finite() {
            return Err(BandMixError::InvalidParameter {
                field: "scale_factor",
                reason: "must be finite",
            });
        }
        Ok(Self {
            image_a,
            image_b,
            mixin_ratio,
            scale_factor,
        })
    }

    pub fn mixin_ratio(&self) -> f32 {
        self.mixin_ratio
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }
}

/// Builds a hybrid image from two same-shape inputs.
///
/// Any low/high combination is accepted; complementary bands give the
/// classic effect.
pub fn hybridize(
    image_a: &Image,
    image_b: &Image,
    config_a: BandConfig,
    config_b: BandConfig,
    mixin_ratio: f32,
    scale_factor: f32,
) -> BandMixResult<Image> {
    let cfg = HybridConfig::new(config_a, config_b, mixin_ratio, scale_factor)?;
    hybridize_with(image_a, image_b, &cfg)
}

/// Builds a hybrid image from a validated configuration.
pub fn hybridize_with(
    image_a: &Image,
    image_b: &Image,
    cfg: &HybridConfig,
) -> BandMixResult<Image> {
    let _span = trace_span!(
        "hybridize",
        mixin_ratio = cfg.mixin_ratio,
        scale_factor = cfg.scale_factor
    )
    .entered();

    image_a.ensure_same_shape(image_b, "hybrid inputs")?;
    let band_a = cfg.image_a.band.apply(image_a, cfg.image_a.params)?;
    let band_b = cfg.image_b.band.apply(image_b, cfg.image_b.params)?;

    let wa = 1.0 - cfg.mixin_ratio;
    let wb = cfg.mixin_ratio;
    let scale = cfg.scale_factor;
    let data: Vec<f32> = band_a
        .as_slice()
        .iter()
        .zip(band_b.as_slice())
        .map(|(&a, &b)| ((wa * a + wb * b) * scale).clamp(0.0, 255.0))
        .collect();
    let out = Image::new(data, image_a.width(), image_a.height(), image_a.depth())?;

    let (min, max) = out.min_max();
    trace_event!("hybrid", min = min, max = max);
    Ok(out)
}
