//! Oscillator waveform generation.

use std::hint::black_box;

use chords_ai::dsp::oscillator::{OscillatorBlock, OscillatorWaveform};
use chords_ai::graph::node::RenderCtx;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

const WAVEFORMS: &[(&str, OscillatorWaveform)] = &[
    ("sine", OscillatorWaveform::Sine),
    ("saw", OscillatorWaveform::Saw),
    ("square", OscillatorWaveform::Square),
    ("triangle", OscillatorWaveform::Triangle),
    ("noise", OscillatorWaveform::Noise),
];

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = RenderCtx::from_note(44_100.0, 69, 100.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        for &(name, waveform) in WAVEFORMS {
            let mut osc = OscillatorBlock::new(waveform);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| osc.render(black_box(&mut buffer), black_box(&ctx)))
            });
        }
    }

    group.finish();
}
