//! Separable Gaussian smoothing with mirrored borders.

use crate::image::Image;
use crate::util::math::{gaussian_samples, reflect_index};
use crate::util::{BandMixError, BandMixResult};

/// Largest truncation radius accepted by the blur.
pub const MAX_BLUR_RADIUS: usize = 1 << 15;

/// Returns `2 * radius + 1`, rejecting radii above [`MAX_BLUR_RADIUS`].
pub(crate) fn tap_count(radius: usize) -> BandMixResult<usize> {
    radius
        .checked_mul(2)
        .and_then(|v| v.checked_add(1))
        .filter(|_| radius <= MAX_BLUR_RADIUS)
        .ok_or(BandMixError::InvalidParameter {
            field: "radius",
            reason: "exceeds the maximum blur radius",
        })
}

/// Normalized 1D Gaussian taps over `[-radius, radius]`.
pub(crate) fn gaussian_taps(sigma: f32, radius: usize) -> BandMixResult<Vec<f32>> {
    let samples = gaussian_samples(f64::from(sigma), tap_count(radius)?);
    let sum: f64 = samples.iter().sum();
    Ok(samples.iter().map(|&v| (v / sum) as f32).collect())
}

/// Blurs every channel of `image` with a Gaussian of width `sigma`,
/// truncated at `radius` samples either side.
///
/// Borders are mirrored with the edge sample repeated. The output has the
/// same shape as the input; no resampling takes place.
pub fn gaussian_blur(image: &Image, sigma: f32, radius: usize) -> BandMixResult<Image> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BandMixError::InvalidParameter {
            field: "sigma",
            reason: "must be a positive finite number",
        });
    }
    let taps = gaussian_taps(sigma, radius)?;
    let horizontal = blur_rows(image, &taps, radius);
    Ok(blur_cols(&horizontal, &taps, radius))
}

fn blur_rows(image: &Image, taps: &[f32], radius: usize) -> Image {
    let width = image.width();
    let depth = image.depth();
    let r = radius as isize;
    let mut out = image.zeros_like();
    let row_len = out.row_len();
    for (y, dst) in out.as_mut_slice().chunks_exact_mut(row_len).enumerate() {
        let src = image.row(y).unwrap_or(&[]);
        for x in 0..width {
            for c in 0..depth {
                let mut acc = 0.0f32;
                for (k, &w) in taps.iter().enumerate() {
                    let sx = reflect_index(x as isize + k as isize - r, width);
                    acc += w * src[sx * depth + c];
                }
                dst[x * depth + c] = acc;
            }
        }
    }
    out
}

fn blur_cols(image: &Image, taps: &[f32], radius: usize) -> Image {
    let height = image.height();
    let r = radius as isize;
    let mut out = image.zeros_like();
    let row_len = out.row_len();
    let src = image.as_slice();
    for (y, dst) in out.as_mut_slice().chunks_exact_mut(row_len).enumerate() {
        for (k, &w) in taps.iter().enumerate() {
            let sy = reflect_index(y as isize + k as isize - r, height);
            let src_row = &src[sy * row_len..(sy + 1) * row_len];
            for (d, &s) in dst.iter_mut().zip(src_row) {
                *d += w * s;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{gaussian_blur, gaussian_taps, MAX_BLUR_RADIUS};
    use crate::image::Image;
    use crate::util::BandMixError;

    #[test]
    fn taps_are_normalized_and_symmetric() {
        let taps = gaussian_taps(2.0, 8).unwrap();
        assert_eq!(taps.len(), 17);
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!((taps[0] - taps[16]).abs() < 1e-9);
    }

    #[test]
    fn constant_image_is_preserved_with_mirrored_borders() {
        let img = Image::filled(7, 5, 3, 80.0).unwrap();
        let out = gaussian_blur(&img, 3.0, 12).unwrap();
        assert_eq!(out.shape(), img.shape());
        for &v in out.as_slice() {
            assert!((v - 80.0).abs() < 1e-3);
        }
    }

    #[test]
    fn zero_radius_is_identity() {
        let img = Image::from_fn(4, 3, 1, |x, y, _| (x + 10 * y) as f32).unwrap();
        let out = gaussian_blur(&img, 5.0, 0).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn channels_are_blurred_independently() {
        let img = Image::from_fn(6, 6, 3, |_, _, c| if c == 1 { 100.0 } else { 0.0 }).unwrap();
        let out = gaussian_blur(&img, 1.5, 6).unwrap();
        for px in out.as_slice().chunks_exact(3) {
            assert_eq!(px[0], 0.0);
            assert!((px[1] - 100.0).abs() < 1e-3);
            assert_eq!(px[2], 0.0);
        }
    }

    #[test]
    fn oversized_radius_is_rejected() {
        let img = Image::filled(3, 3, 1, 1.0).unwrap();
        let expected = BandMixError::InvalidParameter {
            field: "radius",
            reason: "exceeds the maximum blur radius",
        };
        assert_eq!(gaussian_blur(&img, 1.0, usize::MAX).err(), Some(expected.clone()));
        assert_eq!(gaussian_blur(&img, 1.0, MAX_BLUR_RADIUS + 1).err(), Some(expected));
        assert!(gaussian_taps(1.0, MAX_BLUR_RADIUS).is_ok());
    }
}
