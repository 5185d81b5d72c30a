//! Preset documents and their validation.
//!
//! `Preset` mirrors the on-disk document with every field optional. The
//! `resolve_*` methods run an explicit validation pass that reports the
//! first missing or invalid key by name and, on success, return new
//! resolved values. A `Preset` is never modified by resolution, so the same
//! document can be resolved any number of times.
//!
//! Recognized layout:
//!
//! ```json
//! {
//!   "single_image": { "kernel": [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
//!                     "blur_sigma": 2.0, "blur_size": 9 },
//!   "hybrid_image": {
//!     "image_a": { "blur_sigma": 4.0, "blur_size": 25, "high_low": "low" },
//!     "image_b": { "blur_sigma": 2.0, "blur_size": 13, "high_low": "high" },
//!     "mixin_ratio": 0.5,
//!     "scale_factor": 1.0
//!   }
//! }
//! ```

use crate::band::{Band, GaussianParams};
use crate::hybrid::{BandConfig, HybridConfig};
use crate::kernel::Kernel;
use crate::util::{BandMixError, BandMixResult};

#[cfg(feature = "serde")]
pub mod json;

/// Filter settings for one image.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FilterPreset {
    /// Explicit kernel rows; takes precedence over the Gaussian keys.
    pub kernel: Option<Vec<Vec<f32>>>,
    pub blur_sigma: Option<f32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "json::deserialize_blur_size")
    )]
    pub blur_size: Option<i64>,
    /// `"high"` or `"low"`; only read for hybrid inputs.
    pub high_low: Option<String>,
}

/// Hybrid-image settings.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct HybridPreset {
    pub image_a: Option<FilterPreset>,
    pub image_b: Option<FilterPreset>,
    pub mixin_ratio: Option<f32>,
    pub scale_factor: Option<f32>,
}

/// Top-level preset document.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Preset {
    pub single_image: Option<FilterPreset>,
    pub hybrid_image: Option<HybridPreset>,
}

/// Kernel resolved from a [`FilterPreset`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedFilterConfig {
    pub kernel: Kernel,
    /// Set when the kernel was synthesized from `blur_sigma`/`blur_size`.
    pub gaussian: Option<GaussianParams>,
}

fn require<T: Clone>(
    value: &Option<T>,
    group: &'static str,
    field: &'static str,
) -> BandMixResult<T> {
    value
        .clone()
        .ok_or(BandMixError::MissingField { group, field })
}

impl FilterPreset {
    /// Validates `blur_sigma` then `blur_size`. Sizes outside
    /// `1..=MAX_KERNEL_SIDE` are rejected before any kernel is built.
    pub fn gaussian_params(&self, group: &'static str) -> BandMixResult<GaussianParams> {
        let sigma = require(&self.blur_sigma, group, "blur_sigma")?;
        let size = require(&self.blur_size, group, "blur_size")?;
        let size = usize::try_from(size)
            .ok()
            .filter(|&s| s > 0)
            .ok_or(BandMixError::InvalidParameter {
                field: "blur_size",
                reason: "must be at least 1",
            })?;
        GaussianParams::new(sigma, size)
    }

    /// Resolves the kernel: explicit rows if given, else a Gaussian.
    pub fn resolve(&self, group: &'static str) -> BandMixResult<ResolvedFilterConfig> {
        if let Some(rows) = &self.kernel {
            return Ok(ResolvedFilterConfig {
                kernel: Kernel::from_rows(rows)?,
                gaussian: None,
            });
        }
        let params = self.gaussian_params(group)?;
        Ok(ResolvedFilterConfig {
            kernel: params.kernel()?,
            gaussian: Some(params),
        })
    }

    /// Resolves the Gaussian parameters and the `high_low` band.
    pub fn resolve_band(&self, group: &'static str) -> BandMixResult<BandConfig> {
        let params = self.gaussian_params(group)?;
        let band: Band = require(&self.high_low, group, "high_low")?.parse()?;
        Ok(BandConfig { band, params })
    }
}

impl Preset {
    /// Returns the `single_image` group or names it as missing.
    pub fn single_image(&self) -> BandMixResult<&FilterPreset> {
        self.single_image.as_ref().ok_or(BandMixError::MissingField {
            group: "preset",
            field: "single_image",
        })
    }

    /// Resolves the kernel of the `single_image` group.
    pub fn resolve_single(&self) -> BandMixResult<ResolvedFilterConfig> {
        self.single_image()?.resolve("single_image")
    }

    /// Resolves the `hybrid_image` group.
    ///
    /// Checks `image_a`, then `image_b`, then `mixin_ratio` and
    /// `scale_factor`; the first problem found is returned.
    pub fn resolve_hybrid(&self) -> BandMixResult<HybridConfig> {
        let hybrid = self.hybrid_image.as_ref().ok_or(BandMixError::MissingField {
            group: "preset",
            field: "hybrid_image",
        })?;
        let image_a = require(&hybrid.image_a, "hybrid_image", "image_a")?.resolve_band("image_a")?;
        let image_b = require(&hybrid.image_b, "hybrid_image", "image_b")?.resolve_band("image_b")?;
        let mixin_ratio = require(&hybrid.mixin_ratio, "hybrid_image", "mixin_ratio")?;
        let scale_factor = require(&hybrid.scale_factor, "hybrid_image", "scale_factor")?;
        HybridConfig::new(image_a, image_b, mixin_ratio, scale_factor)
    }
}
