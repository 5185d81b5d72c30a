//! Rayon-parallel filtering (feature-gated).
//!
//! Output rows are independent, so the row loop of [`filter`](super::filter)
//! is split across the rayon pool. Each row runs the same scalar code, so
//! the result is bit-identical to the sequential path.

use crate::filter::{correlate_row, prepare, FilterMode};
use crate::image::Image;
use crate::kernel::Kernel;
use crate::trace::trace_span;
use rayon::prelude::*;

/// Row-parallel variant of [`filter`](super::filter).
pub fn filter_par(image: &Image, kernel: &Kernel, mode: FilterMode) -> Image {
    let _span = trace_span!(
        "filter_par",
        kernel_h = kernel.height(),
        kernel_w = kernel.width()
    )
    .entered();

    let (canvas, kernel) = prepare(image, kernel, mode);
    let mut out = image.zeros_like();
    let row_len = out.row_len();
    out.as_mut_slice()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, out_row)| correlate_row(&canvas, &kernel, y, out_row));
    out
}
