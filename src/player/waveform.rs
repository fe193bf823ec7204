use std::time::Duration;

#[cfg(feature = "wav")]
use std::path::Path;

#[cfg(feature = "wav")]
use crate::error::Result;
use crate::io::converter::to_pcm_i16;

/// Mono audio with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Append a block after the current end.
    pub fn extend_from_slice(&mut self, block: &[f32]) {
        self.samples.extend_from_slice(block);
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    pub fn to_pcm_i16(&self) -> Vec<i16> {
        to_pcm_i16(&self.samples)
    }

    /// Write 16-bit mono PCM.
    #[cfg(feature = "wav")]
    pub fn write_wav(&self, path: impl AsRef<Path>) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
        for sample in self.to_pcm_i16() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;

        tracing::debug!(path = %path.as_ref().display(), samples = self.len(), "wrote WAV");
        Ok(())
    }
}
