//! State-variable filter responses.

use std::hint::black_box;

use chords_ai::dsp::filter::{FilterType, SVFilter};
use chords_ai::graph::node::RenderCtx;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

const RESPONSES: &[(&str, FilterType)] = &[
    ("lowpass", FilterType::LowPass),
    ("highpass", FilterType::HighPass),
    ("bandpass", FilterType::BandPass),
    ("notch", FilterType::Notch),
];

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = RenderCtx::from_note(44_100.0, 60, 100.0);

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for &(name, response) in RESPONSES {
            let mut filter = SVFilter::new(response, 3_200.0, 0.1);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }
    }

    group.finish();
}
