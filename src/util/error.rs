//! Error types for bandmix.

use thiserror::Error;

/// Result alias for bandmix operations.
pub type BandMixResult<T> = std::result::Result<T, BandMixError>;

/// Errors that can occur when running bandmix algorithms.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BandMixError {
    /// A required configuration key is absent.
    #[error("configuration error: missing `{field}` in `{group}`")]
    MissingField {
        group: &'static str,
        field: &'static str,
    },
    /// A configuration value is present but unusable.
    #[error("configuration error: invalid `{field}`: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: &'static str,
    },
    /// Kernel weights are empty, ragged or non-finite.
    #[error("configuration error: invalid kernel: {reason}")]
    InvalidKernel { reason: &'static str },
    /// The preset document could not be parsed.
    #[error("configuration error: malformed preset: {reason}")]
    PresetParse { reason: String },
    /// The preset file could not be read.
    #[error("preset I/O error: {reason}")]
    PresetIo { reason: String },
    /// Image width or height is zero or overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Image depth is not 1 (grayscale) or 3 (color).
    #[error("invalid depth {depth}, expected 1 or 3")]
    InvalidDepth { depth: usize },
    /// The sample buffer length does not match the image shape.
    #[error("buffer length mismatch: needed {needed}, got {got}")]
    BufferLength { needed: usize, got: usize },
    /// Two images that must share a shape do not.
    #[error("dimension mismatch in {context}: expected {expected:?} (h, w, d), got {got:?}")]
    DimensionMismatch {
        context: &'static str,
        expected: (usize, usize, usize),
        got: (usize, usize, usize),
    },
    /// Image decoding or encoding failed.
    #[error("image I/O error: {reason}")]
    ImageIo { reason: String },
}

impl BandMixError {
    /// Returns true for errors caused by a missing or malformed configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidParameter { .. }
                | Self::InvalidKernel { .. }
                | Self::PresetParse { .. }
        )
    }
}
