use bandmix::{
    blend, build_stacks, reconstruct, BandMixError, BlendConfig, Image, Normalization,
    StackParams,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(seed: u64, width: usize, height: usize, depth: usize) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    Image::from_fn(width, height, depth, |_, _, _| rng.random_range(0.0f32..255.0)).unwrap()
}

fn assert_close(a: &Image, b: &Image, tol: f32) {
    assert_eq!(a.shape(), b.shape());
    for (i, (x, y)) in a.as_slice().iter().zip(b.as_slice()).enumerate() {
        assert!((x - y).abs() <= tol, "sample {i}: {x} vs {y}");
    }
}

fn cfg(include_residual: bool) -> BlendConfig {
    BlendConfig {
        stack: StackParams::new(4, 2.0),
        normalization: Normalization::None,
        include_residual,
    }
}

#[test]
fn laplacian_sum_plus_coarsest_reconstructs_input() {
    let img = random_image(1, 24, 18, 3);
    let (g, l) = build_stacks(&img, &StackParams::new(5, 3.0)).unwrap();
    assert_eq!(g.len(), 6);
    assert_eq!(l.len(), 5);
    assert_eq!(g.level(0), Some(&img));
    assert_close(&reconstruct(&g, &l).unwrap(), &img, 1e-2);
}

#[test]
fn blurring_never_resizes() {
    let img = random_image(2, 7, 5, 1);
    let (g, l) = build_stacks(&img, &StackParams::new(3, 16.0)).unwrap();
    for level in g.levels().iter().chain(l.levels()) {
        assert_eq!(level.shape(), (5, 7, 1));
    }
}

#[test]
fn full_mask_selects_image_a_and_empty_mask_selects_image_b() {
    let a = random_image(3, 20, 16, 3);
    let b = random_image(4, 20, 16, 3);
    let full = Image::filled(20, 16, 1, 255.0).unwrap();
    let empty = Image::filled(20, 16, 1, 0.0).unwrap();

    let out = blend(&a, &b, &full, &cfg(true)).unwrap();
    assert_close(&out, &a, 1e-2);
    let out = blend(&a, &b, &empty, &cfg(true)).unwrap();
    assert_close(&out, &b, 1e-2);
}

#[test]
fn band_only_blend_equals_laplacian_sum_of_selected_image() {
    let a = random_image(5, 16, 16, 1);
    let b = random_image(6, 16, 16, 1);
    let full = Image::filled(16, 16, 1, 255.0).unwrap();
    let params = cfg(false);

    let out = blend(&a, &b, &full, &params).unwrap();
    let (g, _) = build_stacks(&a, &params.stack).unwrap();
    let expected = a.sub(g.coarsest().unwrap()).unwrap();
    assert_close(&out, &expected, 1e-2);
}

#[test]
fn reference_blend_is_min_max_normalized() {
    let a = random_image(7, 24, 24, 3);
    let b = random_image(8, 24, 24, 3);
    let mask = Image::from_fn(24, 24, 3, |x, _, _| if x < 12 { 255.0 } else { 0.0 }).unwrap();
    let params = BlendConfig {
        stack: StackParams::new(5, 2.0),
        ..BlendConfig::default()
    };
    let out = blend(&a, &b, &mask, &params).unwrap();
    let (min, max) = out.min_max();
    assert!(min.abs() < 1e-6);
    assert!((max - 1.0).abs() < 1e-6);
}

#[test]
fn mismatched_inputs_are_dimension_errors() {
    let a = random_image(9, 8, 8, 3);
    let b = random_image(10, 8, 9, 3);
    let mask = Image::filled(8, 8, 1, 255.0).unwrap();
    let err = blend(&a, &b, &mask, &cfg(false)).err().unwrap();
    assert_eq!(
        err,
        BandMixError::DimensionMismatch {
            context: "blend inputs",
            expected: (8, 8, 3),
            got: (9, 8, 3),
        }
    );
    assert!(!err.is_configuration_error());
}
