use crate::dsp::oscillator::{OscillatorBlock, OscillatorWaveform};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator
================

The sound source of every voice. An `OscNode` follows the pitch in the
render context, optionally detuned and scaled by a fixed gain:

  freq  = ctx.frequency * 2^(cents / 1200)
  out   = waveform(freq) * gain

Detuned layers give width to chords:

  OscNode::sawtooth()
      .mix(OscNode::sawtooth().with_detune(8.0), 0.5)
*/

pub struct OscNode {
    osc: OscillatorBlock,
    detune_cents: f32,
    gain: f32,
}

impl OscNode {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            detune_cents: 0.0,
            gain: 1.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorWaveform::Saw)
    }

    pub fn square() -> Self {
        Self::new(OscillatorWaveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorWaveform::Triangle)
    }

    /// Set detune in cents (100 cents = 1 semitone).
    pub fn with_detune(mut self, cents: f32) -> Self {
        self.detune_cents = cents;
        self
    }

    /// Scale the oscillator output.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let frequency = if self.detune_cents != 0.0 {
            ctx.frequency * 2.0_f32.powf(self.detune_cents / 1200.0)
        } else {
            ctx.frequency
        };

        let detuned = RenderCtx { frequency, ..*ctx };
        self.osc.render(out, &detuned);

        if self.gain != 1.0 {
            for sample in out.iter_mut() {
                *sample *= self.gain;
            }
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
    }
}
