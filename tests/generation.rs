use chords_ai::{ChordGenerator, ChordsError};
use rand::{rngs::StdRng, SeedableRng};

const SEED: &str = "C Am F G";

#[test]
fn generates_requested_number_of_known_chords() {
    let generator = ChordGenerator::bundled().unwrap();
    let generated = generator.generate(SEED, 32).unwrap();

    let chords: Vec<&str> = generated.split(' ').collect();
    assert_eq!(chords.len(), 32);
    for chord in chords {
        assert!(generator.mapping().contains_key(chord), "{chord} not in vocabulary");
    }
}

#[test]
fn seeded_rng_is_reproducible() {
    let generator = ChordGenerator::bundled().unwrap();
    let first = generator
        .generate_with_rng(SEED, 16, &mut StdRng::seed_from_u64(42))
        .unwrap();
    let second = generator
        .generate_with_rng(SEED, 16, &mut StdRng::seed_from_u64(42))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn output_excludes_the_seed() {
    let generator = ChordGenerator::bundled().unwrap();
    assert_eq!(generator.generate(SEED, 0).unwrap(), "");
    assert_eq!(generator.generate(SEED, 1).unwrap().split(' ').count(), 1);
}

#[test]
fn seed_must_fill_the_window() {
    let generator = ChordGenerator::bundled().unwrap();
    let err = generator.generate("C Am F", 4).unwrap_err();
    assert!(matches!(err, ChordsError::SeedLength { expected: 4, actual: 3 }));
}

#[test]
fn seed_chords_must_be_in_vocabulary() {
    let generator = ChordGenerator::bundled().unwrap();
    let err = generator.generate("C Am F Gsus4", 4).unwrap_err();
    assert!(matches!(err, ChordsError::UnknownChord(name) if name == "Gsus4"));
}

#[test]
fn mappings_are_inverse() {
    let generator = ChordGenerator::bundled().unwrap();
    let inverse = generator.inverse_mapping();
    assert!(inverse.windows(2).all(|w| w[0] < w[1]));
    for (chord, &index) in generator.mapping() {
        assert_eq!(&inverse[index], chord);
    }
}
