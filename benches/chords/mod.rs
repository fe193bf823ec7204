//! Generation and rendering through the public API.

use std::hint::black_box;

use chords_ai::{ChordGenerator, ChordPlayer};
use criterion::{BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

pub fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("chords/generate");
    let generator = ChordGenerator::bundled().expect("bundled generator");
    let mut rng = StdRng::seed_from_u64(7);

    for count in [8usize, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                generator
                    .generate_with_rng(black_box("C Am F G"), count, &mut rng)
                    .expect("generate")
            })
        });
    }

    group.finish();
}

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("chords/render");
    group.sample_size(10);
    let mut player = ChordPlayer::bundled().expect("bundled player");

    for sequence in ["C", "C Am F G"] {
        group.bench_with_input(BenchmarkId::from_parameter(sequence), sequence, |b, s| {
            b.iter(|| player.render(black_box(s), None).expect("render"))
        });
    }

    group.finish();
}
