//! Numeric helpers shared by the filters and pyramid code.

/// Maps an out-of-range index onto `[0, len)` by mirroring at the borders,
/// repeating the edge sample (`d c b a | a b c d | d c b a`).
pub(crate) fn reflect_index(idx: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    let period = 2 * len as isize;
    let m = idx.rem_euclid(period) as usize;
    if m < len {
        m
    } else {
        2 * len - 1 - m
    }
}

/// Samples `exp(-x^2 / (2 sigma^2))` at `n` points centred on zero.
///
/// Coordinates are `i - (n - 1) / 2`, so even lengths straddle the origin.
pub(crate) fn gaussian_samples(sigma: f64, n: usize) -> Vec<f64> {
    let two_var = 2.0 * sigma * sigma;
    let centre = (n as f64 - 1.0) / 2.0;
    (0..n)
        .map(|i| {
            let x = i as f64 - centre;
            (-(x * x) / two_var).exp()
        })
        .collect()
}

/// Returns the Gaussian truncation radius used by the pyramid blur.
pub(crate) fn default_radius(sigma: f32) -> usize {
    (4.0 * sigma + 0.5).max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::{default_radius, gaussian_samples, reflect_index};

    #[test]
    fn reflect_index_mirrors_with_edge_repeat() {
        assert_eq!(reflect_index(-1, 4), 0);
        assert_eq!(reflect_index(-2, 4), 1);
        assert_eq!(reflect_index(4, 4), 3);
        assert_eq!(reflect_index(5, 4), 2);
        assert_eq!(reflect_index(2, 4), 2);
    }

    #[test]
    fn reflect_index_handles_radius_larger_than_len() {
        for idx in -20isize..20 {
            assert!(reflect_index(idx, 3) < 3);
        }
        assert_eq!(reflect_index(0, 1), 0);
        assert_eq!(reflect_index(-7, 1), 0);
    }

    #[test]
    fn gaussian_samples_are_symmetric() {
        let s = gaussian_samples(1.0, 5);
        assert!((s[0] - s[4]).abs() < 1e-12);
        assert!((s[1] - s[3]).abs() < 1e-12);
        assert!((s[2] - 1.0).abs() < 1e-12);

        let even = gaussian_samples(1.0, 4);
        assert!((even[1] - even[2]).abs() < 1e-12);
    }

    #[test]
    fn default_radius_truncates_at_four_sigma() {
        assert_eq!(default_radius(16.0), 64);
        assert_eq!(default_radius(1.0), 4);
        assert_eq!(default_radius(0.1), 0);
    }
}
