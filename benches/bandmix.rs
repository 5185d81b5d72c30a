use bandmix::{
    blend, cross_correlate, hybridize, Band, BandConfig, BlendConfig, GaussianParams, Image,
    Kernel, StackParams,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_image(width: usize, height: usize, depth: usize) -> Image {
    Image::from_fn(width, height, depth, |x, y, c| {
        (((x * 13) ^ (y * 7) ^ (x * y) ^ (c * 17)) & 0xFF) as f32
    })
    .unwrap()
}

fn bench_filter(c: &mut Criterion) {
    let image = make_image(256, 256, 3);
    let small = Kernel::gaussian(1.0, 3, 3).unwrap();
    let large = Kernel::gaussian(4.0, 25, 25).unwrap();

    c.bench_function("cross_correlate_3x3_rgb_256", |b| {
        b.iter(|| black_box(cross_correlate(&image, &small)));
    });
    c.bench_function("cross_correlate_25x25_rgb_256", |b| {
        b.iter(|| black_box(cross_correlate(&image, &large)));
    });

    #[cfg(feature = "rayon")]
    c.bench_function("filter_par_25x25_rgb_256", |b| {
        b.iter(|| {
            black_box(bandmix::filter_par(
                &image,
                &large,
                bandmix::FilterMode::Convolution,
            ))
        });
    });
}

fn bench_hybrid(c: &mut Criterion) {
    let a = make_image(192, 192, 3);
    let b = make_image(192, 192, 3).scaled(0.5);
    let low = BandConfig {
        band: Band::Low,
        params: GaussianParams::new(4.0, 25).unwrap(),
    };
    let high = BandConfig {
        band: Band::High,
        params: GaussianParams::new(2.0, 13).unwrap(),
    };
    c.bench_function("hybrid_rgb_192", |bch| {
        bch.iter(|| black_box(hybridize(&a, &b, low, high, 0.5, 1.0).unwrap()));
    });
}

fn bench_blend(c: &mut Criterion) {
    let a = make_image(128, 128, 3);
    let b = make_image(128, 128, 3).scaled(0.25);
    let mask = Image::from_fn(128, 128, 1, |x, _, _| if x < 64 { 255.0 } else { 0.0 }).unwrap();
    let cfg = BlendConfig {
        stack: StackParams::new(5, 4.0),
        ..BlendConfig::default()
    };
    c.bench_function("blend_rgb_128_sigma4", |bch| {
        bch.iter(|| black_box(blend(&a, &b, &mask, &cfg).unwrap()));
    });
}

criterion_group!(benches, bench_filter, bench_hybrid, bench_blend);
criterion_main!(benches);
