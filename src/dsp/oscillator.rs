use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/// Waveform shapes an oscillator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillatorWaveform {
    Sine,
    Saw,
    Square,
    Triangle,
    Noise,
}

/// Phase-accumulating oscillator.
///
/// Phase is kept in `[0, 1)` and advanced by `frequency / sample_rate` per
/// sample, so the waveform tracks pitch changes between blocks without
/// discontinuities.
pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
    noise_state: u32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            noise_state: 0x1234_5678,
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

    pub fn noise() -> Self {
        Self::new(OscillatorWaveform::Noise)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    /// Restart the cycle from phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    fn next_noise(&mut self) -> f32 {
        // xorshift32
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let increment = ctx.frequency / ctx.sample_rate;

        for sample in out.iter_mut() {
            let phase = self.phase;
            *sample = match self.waveform {
                OscillatorWaveform::Sine => (std::f32::consts::TAU * phase).sin(),
                OscillatorWaveform::Saw => 2.0 * phase - 1.0,
                OscillatorWaveform::Square => {
                    if phase < 0.5 {
                        1.0
                    } else {
                        -1.0
                    }
                }
                OscillatorWaveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
                OscillatorWaveform::Noise => self.next_noise(),
            };

            self.phase += increment;
            if self.phase >= 1.0 {
                self.phase -= self.phase.floor();
            }
        }
    }
}
