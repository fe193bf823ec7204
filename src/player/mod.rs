//! Chord sequence rendering.
//!
//! Every chord becomes an isolated one-second block: all of its notes start
//! together, the block is captured, the notes stop and the synth instance is
//! dropped. Blocks are concatenated in sequence order with no overlap.

#[cfg(feature = "playback")]
pub mod playback;
pub mod waveform;

use crate::{
    config::PlayerConfig,
    error::{ChordsError, Result},
    synth::{Instrument, OfflineSynth, Synthesizer},
    theory::ChordTable,
};

pub use waveform::Waveform;

/// Length of every rendered chord.
pub const SECONDS_PER_CHORD: usize = 1;

/// Default reference octave; "C" renders as middle C.
pub const DEFAULT_OCTAVE: i8 = 4;

pub struct ChordPlayer<S: Synthesizer = OfflineSynth> {
    table: ChordTable,
    synth: S,
    octave: i8,
    instrument: Instrument,
}

impl ChordPlayer<OfflineSynth> {
    /// Bundled chord table and piano at 44.1 kHz.
    pub fn bundled() -> Result<Self> {
        Self::from_config(&PlayerConfig::default())
    }

    pub fn from_config(config: &PlayerConfig) -> Result<Self> {
        let table = match &config.chords {
            Some(path) => ChordTable::load(path)?,
            None => ChordTable::bundled()?,
        };
        let instrument = match &config.instrument {
            Some(path) => Instrument::load(path)?,
            None => Instrument::bundled()?,
        };
        let synth = OfflineSynth::new(config.sample_rate, config.velocity, config.max_voices);

        Ok(Self::new(table, synth, instrument).with_octave(config.octave))
    }
}

impl<S: Synthesizer> ChordPlayer<S> {
    pub fn new(table: ChordTable, synth: S, instrument: Instrument) -> Self {
        Self {
            table,
            synth,
            octave: DEFAULT_OCTAVE,
            instrument,
        }
    }

    pub fn with_octave(mut self, octave: i8) -> Self {
        self.octave = octave;
        self
    }

    pub fn chords(&self) -> &ChordTable {
        &self.table
    }

    pub fn sample_rate(&self) -> u32 {
        self.synth.sample_rate()
    }

    /// Instrument used when `render` is not given one.
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn synth(&self) -> &S {
        &self.synth
    }

    /// Render a whitespace-separated chord sequence, one second per chord.
    ///
    /// `instrument` overrides the player's default for this call. Every
    /// chord is resolved before any audio is rendered, so an unknown chord
    /// fails the call without synthesizing anything.
    pub fn render(&mut self, sequence: &str, instrument: Option<&Instrument>) -> Result<Waveform> {
        let instrument = instrument.unwrap_or(&self.instrument);
        let sample_rate = self.synth.sample_rate();
        let frames = sample_rate as usize * SECONDS_PER_CHORD;

        let chords = sequence
            .split_whitespace()
            .map(|chord| Ok((chord, self.table.pitches(chord, self.octave)?)))
            .collect::<Result<Vec<(&str, Vec<u8>)>>>()?;

        let mut waveform = Waveform::new(sample_rate);
        for (chord, pitches) in &chords {
            tracing::debug!(chord, ?pitches, "rendering chord");

            let block = self.synth.synthesize(pitches, frames, instrument)?;
            if block.len() != frames {
                return Err(ChordsError::Synth(format!(
                    "expected {frames} samples for '{chord}', got {}",
                    block.len()
                )));
            }
            waveform.extend_from_slice(&block);
        }

        Ok(waveform)
    }

    /// Render, then play through the default output device.
    #[cfg(feature = "playback")]
    pub fn play(&mut self, sequence: &str, instrument: Option<&Instrument>) -> Result<Waveform> {
        let waveform = self.render(sequence, instrument)?;
        playback::play(&waveform)?;
        Ok(waveform)
    }
}
