//! Decoding and encoding through the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Grayscale sources load
//! with depth 1, everything else is converted to 8-bit RGB with depth 3.

use crate::image::Image;
use crate::util::{BandMixError, BandMixResult};
use image::{ColorType, DynamicImage, GrayImage, RgbImage};
use std::path::Path;

/// Creates an owned image from a decoded dynamic image.
pub fn image_from_dynamic(img: &DynamicImage) -> BandMixResult<Image> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    match img.color() {
        ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16 => {
            let gray = img.to_luma8();
            Image::from_u8(gray.as_raw(), width, height, 1)
        }
        _ => {
            let rgb = img.to_rgb8();
            Image::from_u8(rgb.as_raw(), width, height, 3)
        }
    }
}

/// Converts an image to a dynamic image, saturating samples to `[0, 255]`.
pub fn image_to_dynamic(img: &Image) -> BandMixResult<DynamicImage> {
    let width = u32::try_from(img.width()).map_err(|_| BandMixError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let height = u32::try_from(img.height()).map_err(|_| BandMixError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let raw = img.to_u8_saturating();
    let dynamic = if img.depth() == 1 {
        GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8)
    } else {
        RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8)
    };
    dynamic.ok_or_else(|| BandMixError::ImageIo {
        reason: "sample buffer does not match image shape".to_string(),
    })
}

/// Loads an image from disk.
pub fn load_image<P: AsRef<Path>>(path: P) -> BandMixResult<Image> {
    let img = image::open(path).map_err(|err| BandMixError::ImageIo {
        reason: err.to_string(),
    })?;
    image_from_dynamic(&img)
}

/// Saves an image to disk; the format follows the file extension.
pub fn save_image<P: AsRef<Path>>(path: P, img: &Image) -> BandMixResult<()> {
    image_to_dynamic(img)?
        .save(path)
        .map_err(|err| BandMixError::ImageIo {
            reason: err.to_string(),
        })
}
