//! bandmix is a CPU image filtering library built around one primitive:
//! zero-padded 2D cross-correlation.
//!
//! On top of it sit Gaussian kernel synthesis, low/high frequency bands,
//! hybrid images, Gaussian/Laplacian stacks and mask-weighted Laplacian
//! blending. All stages take immutable inputs and return fresh `f32` images.
//! Optional features add row-parallel filtering (`rayon`), file I/O through
//! the `image` crate (`image-io`), JSON presets (`serde`) and spans
//! (`tracing`).

pub mod band;
pub mod blend;
pub mod filter;
pub mod hybrid;
pub mod image;
pub mod kernel;
pub mod preset;
pub mod pyramid;
mod trace;
pub mod util;

pub use band::{high_pass, low_pass, Band, GaussianParams};
pub use blend::{blend, BlendConfig, Normalization};
pub use filter::{convolve, cross_correlate, filter, FilterMode};
pub use hybrid::{hybridize, hybridize_with, BandConfig, HybridConfig};
pub use image::Image;
pub use kernel::Kernel;
pub use preset::{FilterPreset, HybridPreset, Preset, ResolvedFilterConfig};
pub use pyramid::{
    build_stacks, gaussian_blur, reconstruct, GaussianStack, LaplacianStack, StackParams,
};
pub use util::{BandMixError, BandMixResult};

#[cfg(feature = "rayon")]
pub use filter::rayon::filter_par;
