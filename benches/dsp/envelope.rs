//! ADSR envelope stages.

use std::hint::black_box;

use chords_ai::dsp::envelope::Envelope;
use chords_ai::graph::node::RenderCtx;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::from_note(44_100.0, 60, 100.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Long attack keeps the envelope ramping for the whole run
        let mut env = Envelope::from_millis(5_000.0, 400.0, 0.55, 250.0);
        env.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), black_box(&ctx)))
        });

        let mut env = Envelope::from_millis(1.0, 1.0, 0.55, 250.0);
        env.note_on(&ctx);
        for _ in 0..200 {
            env.next_sample(&ctx);
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), black_box(&ctx)))
        });
    }

    group.finish();
}
