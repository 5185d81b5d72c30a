//! Spatial filtering by cross-correlation and convolution.
//!
//! The input is embedded in a zero-filled canvas enlarged by
//! `(kernel_height - 1, kernel_width - 1)`, with the image placed at
//! `(kernel_height / 2, kernel_width / 2)`. Output sample `(x, y, c)` is the
//! dot product of the kernel with the `kernel_height x kernel_width` canvas
//! window whose top-left corner is `(x, y)`, taken in channel `c`. Output
//! shape always equals input shape.

use crate::image::Image;
use crate::kernel::Kernel;
use crate::trace::{trace_event, trace_span};

#[cfg(feature = "rayon")]
pub mod rayon;

/// How the kernel is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// Slide the kernel as given.
    CrossCorrelation,
    /// Slide a 180-degree rotated copy of the kernel.
    Convolution,
}

/// Applies `kernel` to `image` with zero-padded borders.
pub fn filter(image: &Image, kernel: &Kernel, mode: FilterMode) -> Image {
    let _span = trace_span!(
        "filter",
        kernel_h = kernel.height(),
        kernel_w = kernel.width(),
        mode = ?mode
    )
    .entered();

    let (canvas, kernel) = prepare(image, kernel, mode);
    let mut out = image.zeros_like();
    let row_len = out.row_len();
    for (y, out_row) in out.as_mut_slice().chunks_exact_mut(row_len).enumerate() {
        correlate_row(&canvas, &kernel, y, out_row);
    }

    trace_event!("filtered", width = out.width(), height = out.height());
    out
}

/// Cross-correlates `image` with `kernel`.
pub fn cross_correlate(image: &Image, kernel: &Kernel) -> Image {
    filter(image, kernel, FilterMode::CrossCorrelation)
}

/// Convolves `image` with `kernel`; the caller's kernel is left untouched.
pub fn convolve(image: &Image, kernel: &Kernel) -> Image {
    filter(image, kernel, FilterMode::Convolution)
}

/// Builds the zero-padded canvas and the kernel actually slid over it.
pub(crate) fn prepare(image: &Image, kernel: &Kernel, mode: FilterMode) -> (Image, Kernel) {
    let kh = kernel.height();
    let kw = kernel.width();
    let canvas = image.zero_padded(kh - 1, kw - 1, kh / 2, kw / 2);
    let kernel = match mode {
        FilterMode::CrossCorrelation => kernel.clone(),
        FilterMode::Convolution => kernel.flipped(),
    };
    (canvas, kernel)
}

/// Computes output row `y` from the padded canvas.
pub(crate) fn correlate_row(canvas: &Image, kernel: &Kernel, y: usize, out_row: &mut [f32]) {
    let kh = kernel.height();
    let kw = kernel.width();
    let depth = canvas.depth();
    let weights = kernel.weights();
    let width = out_row.len() / depth;
    let canvas_rows: Vec<&[f32]> = (y..y + kh)
        .map(|cy| canvas.row(cy).unwrap_or(&[]))
        .collect();

    for x in 0..width {
        for c in 0..depth {
            let mut acc = 0.0f32;
            for (ky, row) in canvas_rows.iter().enumerate() {
                let taps = &weights[ky * kw..(ky + 1) * kw];
                let base = x * depth + c;
                for (kx, &w) in taps.iter().enumerate() {
                    acc += w * row[base + kx * depth];
                }
            }
            out_row[x * depth + c] = acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{convolve, cross_correlate, filter, FilterMode};
    use crate::image::Image;
    use crate::kernel::Kernel;

    #[test]
    fn identity_kernel_is_exact() {
        let img = Image::from_fn(5, 4, 3, |x, y, c| (x * 7 + y * 13 + c) as f32 * 0.5).unwrap();
        let out = cross_correlate(&img, &Kernel::identity());
        assert_eq!(out, img);
    }

    #[test]
    fn borders_are_zero_padded() {
        let img = Image::filled(3, 3, 1, 1.0).unwrap();
        let ones = Kernel::new(vec![1.0; 9], 3, 3).unwrap();
        let out = cross_correlate(&img, &ones);
        assert_eq!(out.get(1, 1, 0), Some(9.0));
        assert_eq!(out.get(0, 0, 0), Some(4.0));
        assert_eq!(out.get(1, 0, 0), Some(6.0));
    }

    #[test]
    fn shift_kernel_moves_content() {
        let img = Image::new(vec![1.0, 2.0, 3.0], 3, 1, 1).unwrap();
        let right_tap = Kernel::from_rows(&[[0.0, 0.0, 1.0]]).unwrap();
        let cc = cross_correlate(&img, &right_tap);
        assert_eq!(cc.as_slice(), &[2.0, 3.0, 0.0]);
        let conv = convolve(&img, &right_tap);
        assert_eq!(conv.as_slice(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn even_kernels_use_floor_half_offsets() {
        let img = Image::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2, 1).unwrap();
        let k = Kernel::from_rows(&[[1.0, 0.0], [0.0, 0.0]]).unwrap();
        let out = filter(&img, &k, FilterMode::CrossCorrelation);
        assert_eq!(out.as_slice(), &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn convolution_does_not_mutate_kernel() {
        let img = Image::filled(4, 4, 1, 2.0).unwrap();
        let k = Kernel::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let before = k.clone();
        let _ = convolve(&img, &k);
        assert_eq!(k, before);
    }
}
