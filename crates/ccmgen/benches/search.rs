use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ccmgen::search::search;
use ccmgen::{SearchConfig, SpectralData};

fn gaussian(w: f64, center: f64, width: f64) -> f64 {
    (-0.5 * ((w - center) / width).powi(2)).exp()
}

/// Synthetic three-band dataset on a 1 nm grid, shaped like the reference
/// CIE curves.
fn synth_dataset(n: usize) -> SpectralData {
    let wavelengths: Vec<f64> = (0..n).map(|i| 390.0 + i as f64).collect();
    let samples: Vec<[f64; 3]> = wavelengths
        .iter()
        .map(|&w| {
            [
                gaussian(w, 600.0, 45.0),
                gaussian(w, 550.0, 40.0),
                gaussian(w, 450.0, 25.0),
            ]
        })
        .collect();
    SpectralData::new(wavelengths, samples).expect("valid dataset")
}

fn bench_search(c: &mut Criterion) {
    let data = synth_dataset(391);
    let config = SearchConfig {
        max_iters: 1_000,
        ..Default::default()
    };

    c.bench_function("search_1k_iters_391_samples", |b| {
        b.iter(|| black_box(search(&data, &config)))
    });

    let small = synth_dataset(32);
    c.bench_function("search_1k_iters_32_samples", |b| {
        b.iter(|| black_box(search(&small, &config)))
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
