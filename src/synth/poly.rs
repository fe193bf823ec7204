use rtrb::Consumer;

use crate::{
    graph::node::GraphNode,
    synth::{
        factory::VoiceFactory,
        message::SynthMessage,
        voice::{Voice, VoiceState},
    },
    MAX_BLOCK_SIZE,
};

/// Fixed pool of identical voices driven by note messages.
///
/// Messages are drained at the start of every block, so a note-on pushed
/// before the first `render` call sounds from sample zero.
pub struct PolySynth<V: GraphNode> {
    voices: Vec<Voice<V>>,
    rx: Consumer<SynthMessage>,
    temp_buffer: Vec<f32>,
    frame_counter: u64,
}

impl<V: GraphNode> PolySynth<V> {
    pub fn new<F>(factory: &F, sample_rate: f32, max_voices: usize, rx: Consumer<SynthMessage>) -> Self
    where
        F: VoiceFactory<Voice = V>,
    {
        let voices = (0..max_voices)
            .map(|_| Voice::new(factory.create_voice(), sample_rate))
            .collect();

        Self {
            voices,
            rx,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        }
    }

    /// Render any number of frames, split into blocks of at most
    /// `MAX_BLOCK_SIZE`.
    pub fn render(&mut self, out: &mut [f32]) {
        if out.is_empty() {
            self.render_block(out);
            return;
        }
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    /// Render one block. Use `render` for arbitrary lengths.
    ///
    /// # Panics
    ///
    /// If `out` is longer than `MAX_BLOCK_SIZE`.
    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);

        while let Ok(msg) = self.rx.pop() {
            match msg {
                SynthMessage::NoteOn { note, velocity } => {
                    let age = self.frame_counter;
                    match self.allocate_voice() {
                        Some(voice) => voice.start(note, velocity, age),
                        None => tracing::warn!(note, "no voice available, note dropped"),
                    }
                }
                SynthMessage::NoteOff { note, .. } => {
                    if let Some(voice) = self.find_voice(note) {
                        voice.release();
                    }
                }
                SynthMessage::AllNotesOff => {
                    for voice in &mut self.voices {
                        voice.release();
                    }
                }
            }
        }

        out.fill(0.0);
        for voice in &mut self.voices {
            if voice.is_active() {
                let buffer = &mut self.temp_buffer[..out.len()];
                buffer.fill(0.0);
                voice.render(buffer);

                for (o, v) in out.iter_mut().zip(buffer.iter()) {
                    *o += v;
                }
            }
        }

        self.frame_counter += out.len() as u64;
    }

    /// Voices currently sounding, releasing ones included.
    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    fn allocate_voice(&mut self) -> Option<&mut Voice<V>> {
        if let Some(idx) = self.voices.iter().position(|v| v.is_free()) {
            return Some(&mut self.voices[idx]);
        }

        // Steal the oldest releasing voice
        let steal_idx = self
            .voices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.state() == VoiceState::Releasing)
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx);

        steal_idx.map(|idx| &mut self.voices[idx])
    }

    fn find_voice(&mut self, note: u8) -> Option<&mut Voice<V>> {
        self.voices
            .iter_mut()
            .find(|v| v.note() == note && v.state() == VoiceState::Active)
    }
}

#[cfg(test)]
mod tests {
    use rtrb::RingBuffer;

    use super::*;
    use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode};

    fn sine_voice() -> impl GraphNode {
        OscNode::sine().amplify(EnvNode::adsr(0.001, 0.01, 0.8, 0.01))
    }

    #[test]
    fn silent_without_notes() {
        let (_tx, rx) = RingBuffer::new(8);
        let mut synth = PolySynth::new(&sine_voice, 48_000.0, 4, rx);

        let mut out = vec![1.0f32; 256];
        synth.render(&mut out);
        assert!(out.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn chord_uses_one_voice_per_note() {
        let (mut tx, rx) = RingBuffer::new(8);
        let mut synth = PolySynth::new(&sine_voice, 48_000.0, 4, rx);

        for note in [60, 64, 67] {
            tx.push(SynthMessage::NoteOn { note, velocity: 100 }).unwrap();
        }
        let mut out = vec![0.0f32; 4096];
        synth.render(&mut out);

        assert_eq!(synth.active_voices(), 3);
        assert!(out.iter().any(|s| s.abs() > 0.1));
    }

    #[test]
    fn released_voices_are_freed() {
        let (mut tx, rx) = RingBuffer::new(8);
        let mut synth = PolySynth::new(&sine_voice, 48_000.0, 2, rx);

        tx.push(SynthMessage::NoteOn { note: 60, velocity: 100 }).unwrap();
        let mut out = vec![0.0f32; 512];
        synth.render(&mut out);

        tx.push(SynthMessage::AllNotesOff).unwrap();
        // 10 ms release at 48 kHz fits well inside 2048 frames
        let mut tail = vec![0.0f32; 2048];
        synth.render(&mut tail);

        assert_eq!(synth.active_voices(), 0);
    }

    #[test]
    fn excess_notes_are_dropped_not_stolen_from_active() {
        let (mut tx, rx) = RingBuffer::new(8);
        let mut synth = PolySynth::new(&sine_voice, 48_000.0, 2, rx);

        for note in [60, 64, 67] {
            tx.push(SynthMessage::NoteOn { note, velocity: 100 }).unwrap();
        }
        let mut out = vec![0.0f32; 64];
        synth.render(&mut out);

        assert_eq!(synth.active_voices(), 2);
    }
}
