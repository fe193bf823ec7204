#![cfg(feature = "soundfont")]

use std::fs;

use chords_ai::{ChordPlayer, ChordTable, ChordsError, Instrument, OfflineSynth, Synthesizer};

const PERIOD: usize = 100;
const SAMPLE_FRAMES: usize = 8 * PERIOD;
// Sample data must extend past the last sample end
const PADDING: usize = 46;

fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    out
}

fn list(kind: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut body = kind.to_vec();
    for c in chunks {
        body.extend_from_slice(c);
    }
    chunk(b"LIST", &body)
}

fn name(text: &str) -> [u8; 20] {
    let mut out = [0u8; 20];
    out[..text.len()].copy_from_slice(text.as_bytes());
    out
}

fn preset(title: &str, bag: u16) -> Vec<u8> {
    let mut out = name(title).to_vec();
    out.extend_from_slice(&0u16.to_le_bytes()); // patch
    out.extend_from_slice(&0u16.to_le_bytes()); // bank
    out.extend_from_slice(&bag.to_le_bytes());
    out.extend_from_slice(&[0u8; 12]); // library, genre, morphology
    out
}

fn instrument(title: &str, bag: u16) -> Vec<u8> {
    let mut out = name(title).to_vec();
    out.extend_from_slice(&bag.to_le_bytes());
    out
}

fn generators(pairs: &[(u16, u16)]) -> Vec<u8> {
    pairs
        .iter()
        .chain(std::iter::once(&(0, 0)))
        .flat_map(|(kind, value)| [kind.to_le_bytes(), value.to_le_bytes()].concat())
        .collect()
}

fn bags(indices: &[u16]) -> Vec<u8> {
    indices
        .iter()
        .flat_map(|i| [i.to_le_bytes(), 0u16.to_le_bytes()].concat())
        .collect()
}

fn sample_header(title: &str, end: u32, rate: u32, pitch: u8, kind: u16) -> Vec<u8> {
    let mut out = name(title).to_vec();
    out.extend_from_slice(&0u32.to_le_bytes()); // start
    out.extend_from_slice(&end.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // loop start
    out.extend_from_slice(&end.to_le_bytes()); // loop end
    out.extend_from_slice(&rate.to_le_bytes());
    out.push(pitch);
    out.push(0); // pitch correction
    out.extend_from_slice(&0u16.to_le_bytes()); // link
    out.extend_from_slice(&kind.to_le_bytes());
    out
}

/// One preset playing a looped 440 Hz sine, rooted on A4.
fn sine_sound_font() -> Vec<u8> {
    let wave: Vec<u8> = (0..SAMPLE_FRAMES + PADDING)
        .map(|i| {
            if i >= SAMPLE_FRAMES {
                return 0i16;
            }
            let phase = (i % PERIOD) as f32 / PERIOD as f32;
            ((2.0 * std::f32::consts::PI * phase).sin() * 16_000.0) as i16
        })
        .flat_map(i16::to_le_bytes)
        .collect();

    const INSTRUMENT: u16 = 41;
    const SAMPLE_ID: u16 = 53;
    const SAMPLE_MODES: u16 = 54;

    let info = list(b"INFO", &[]);
    let sdta = list(b"sdta", &[chunk(b"smpl", &wave)]);
    let pdta = list(
        b"pdta",
        &[
            chunk(b"phdr", &[preset("Sine", 0), preset("EOP", 1)].concat()),
            chunk(b"pbag", &bags(&[0, 1])),
            chunk(b"pmod", &[0u8; 10]),
            chunk(b"pgen", &generators(&[(INSTRUMENT, 0)])),
            chunk(b"inst", &[instrument("Sine", 0), instrument("EOI", 1)].concat()),
            chunk(b"ibag", &bags(&[0, 2])),
            chunk(b"imod", &[0u8; 10]),
            chunk(b"igen", &generators(&[(SAMPLE_MODES, 1), (SAMPLE_ID, 0)])),
            chunk(
                b"shdr",
                &[
                    sample_header("Sine", SAMPLE_FRAMES as u32, 44_000, 69, 1),
                    sample_header("EOS", 0, 0, 0, 0),
                ]
                .concat(),
            ),
        ],
    );

    let mut body = b"sfbk".to_vec();
    body.extend_from_slice(&[info, sdta, pdta].concat());
    chunk(b"RIFF", &body)
}

fn load_sine() -> (tempfile::TempDir, Instrument) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sine.sf2");
    fs::write(&path, sine_sound_font()).unwrap();
    let instrument = Instrument::load(&path).unwrap();
    (dir, instrument)
}

#[test]
fn loads_sf2_by_extension() {
    let (_dir, instrument) = load_sine();
    assert!(matches!(instrument, Instrument::SoundFont(_)));
}

#[test]
fn garbage_sf2_is_an_instrument_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.sf2");
    fs::write(&path, b"RIFF\x04\x00\x00\x00nope").unwrap();

    let err = Instrument::load(&path).unwrap_err();
    assert!(matches!(err, ChordsError::Instrument(_)));
}

#[test]
fn sound_font_renders_exact_frames() {
    let (_dir, instrument) = load_sine();
    let mut synth = OfflineSynth::new(44_100, 100, 4);

    let block = synth.synthesize(&[57, 60, 64], 44_100, &instrument).unwrap();
    assert_eq!(block.len(), 44_100);
    assert!(block.iter().any(|s| s.abs() > 1e-3));
    assert!(block.iter().all(|s| s.is_finite()));
}

#[test]
fn master_gain_applies_to_sound_fonts() {
    let (_dir, instrument) = load_sine();
    let full = OfflineSynth::new(44_100, 100, 4)
        .with_gain(1.0)
        .synthesize(&[69], 2_000, &instrument)
        .unwrap();
    let quarter = OfflineSynth::new(44_100, 100, 4)
        .with_gain(0.25)
        .synthesize(&[69], 2_000, &instrument)
        .unwrap();

    for (f, q) in full.iter().zip(&quarter) {
        assert!((f * 0.25 - q).abs() < 1e-6);
    }
}

#[test]
fn player_renders_with_sound_font_override() {
    let (_dir, instrument) = load_sine();
    let table = ChordTable::from_yaml_str("Am: [A, C5, E5]\n").unwrap();
    let synth = OfflineSynth::new(44_100, 90, 8);
    let mut player = ChordPlayer::new(table, synth, Instrument::bundled().unwrap());

    let waveform = player.render("Am Am", Some(&instrument)).unwrap();
    assert_eq!(waveform.len(), 2 * 44_100);
    assert!(waveform.peak() > 0.0);
}
