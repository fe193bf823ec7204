use rtrb::RingBuffer;

use crate::{
    error::{ChordsError, Result},
    patch::Patch,
    synth::{instrument::Instrument, message::SynthMessage, poly::PolySynth},
};

/// Renders a set of simultaneous pitches into a mono block.
///
/// This is the seam between the chord player and whatever produces sound;
/// tests swap in fakes.
pub trait Synthesizer {
    /// Sample rate of the blocks this synthesizer produces.
    fn sample_rate(&self) -> u32;

    /// Start every pitch at once, capture exactly `frames` samples, then
    /// stop the notes. Nothing carries over between calls.
    fn synthesize(&mut self, pitches: &[u8], frames: usize, instrument: &Instrument)
        -> Result<Vec<f32>>;
}

/// Default synthesizer: a fresh `PolySynth` (or SoundFont synth) per call.
#[derive(Debug, Clone)]
pub struct OfflineSynth {
    sample_rate: u32,
    velocity: u8,
    max_voices: usize,
    gain: f32,
}

impl OfflineSynth {
    pub const DEFAULT_GAIN: f32 = 0.3;

    pub fn new(sample_rate: u32, velocity: u8, max_voices: usize) -> Self {
        Self {
            sample_rate,
            velocity: velocity.min(127),
            max_voices,
            gain: Self::DEFAULT_GAIN,
        }
    }

    /// Master gain applied to every rendered block, patch or SoundFont.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    fn render_patch(&self, patch: &Patch, pitches: &[u8], frames: usize) -> Result<Vec<f32>> {
        let (mut tx, rx) = RingBuffer::<SynthMessage>::new(pitches.len().max(1) * 2);
        let voices = self.max_voices.max(pitches.len());
        let mut synth = PolySynth::new(patch, self.sample_rate as f32, voices, rx);

        let queue_full = |_| ChordsError::Synth("note queue full".to_string());
        for &note in pitches.iter().rev() {
            tx.push(SynthMessage::NoteOn {
                note,
                velocity: self.velocity,
            })
            .map_err(queue_full)?;
        }

        let mut out = vec![0.0f32; frames];
        synth.render(&mut out);

        for &note in pitches {
            tx.push(SynthMessage::NoteOff {
                note,
                velocity: self.velocity,
            })
            .map_err(queue_full)?;
        }
        // Drain the note-offs before the instance goes away
        synth.render_block(&mut []);

        Ok(out)
    }

    #[cfg(feature = "soundfont")]
    fn render_sound_font(
        &self,
        sound_font: &std::sync::Arc<rustysynth::SoundFont>,
        pitches: &[u8],
        frames: usize,
    ) -> Result<Vec<f32>> {
        let settings = rustysynth::SynthesizerSettings::new(self.sample_rate as i32);
        let mut synth = rustysynth::Synthesizer::new(sound_font, &settings)
            .map_err(|e| ChordsError::Synth(format!("{e:?}")))?;

        for &note in pitches.iter().rev() {
            synth.note_on(0, note as i32, self.velocity as i32);
        }

        let mut left = vec![0.0f32; frames];
        let mut right = vec![0.0f32; frames];
        synth.render(&mut left, &mut right);

        for &note in pitches {
            synth.note_off(0, note as i32);
        }

        Ok(left
            .iter()
            .zip(right.iter())
            .map(|(l, r)| 0.5 * (l + r))
            .collect())
    }
}

impl Synthesizer for OfflineSynth {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn synthesize(
        &mut self,
        pitches: &[u8],
        frames: usize,
        instrument: &Instrument,
    ) -> Result<Vec<f32>> {
        tracing::trace!(?pitches, frames, ?instrument, "synthesizing");

        let mut out = match instrument {
            Instrument::Patch(patch) => self.render_patch(patch, pitches, frames)?,
            #[cfg(feature = "soundfont")]
            Instrument::SoundFont(sound_font) => {
                self.render_sound_font(sound_font, pitches, frames)?
            }
        };

        for sample in out.iter_mut() {
            *sample *= self.gain;
        }
        Ok(out)
    }
}
