//! Serializable instrument descriptions.
//!
//! A `Patch` is the crate's own instrument format: one or more layers, each
//! an oscillator stack shaped by an amplitude envelope and an optional
//! filter. Patches load from YAML or JSON and build a fresh voice graph per
//! voice through `VoiceFactory`.
//!
//! ```yaml
//! name: organ
//! layers:
//!   - oscillators:
//!       - { waveform: sine }
//!       - { waveform: sine, detune_cents: 1200.0, gain: 0.5 }
//!     envelope: { attack_ms: 10.0, decay_ms: 50.0, sustain_level: 1.0, release_ms: 80.0 }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    dsp::{envelope::Envelope, filter::FilterType, oscillator::OscillatorWaveform},
    error::{ChordsError, Result},
    graph::{
        envelope::EnvNode, extensions::NodeExt, filter::FilterNode, node::GraphNode,
        oscillator::OscNode,
    },
    synth::factory::VoiceFactory,
};

fn unity() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub layers: Vec<VoiceLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceLayer {
    pub oscillators: Vec<OscillatorDescriptor>,
    pub envelope: EnvelopeDescriptor,
    #[serde(default)]
    pub filter: Option<FilterDescriptor>,
    #[serde(default = "unity")]
    pub gain: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillatorDescriptor {
    pub waveform: OscillatorWaveform,
    #[serde(default)]
    pub detune_cents: f32,
    #[serde(default = "unity")]
    pub gain: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeDescriptor {
    pub attack_ms: f32,
    pub decay_ms: f32,
    pub sustain_level: f32,
    pub release_ms: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub filter_type: FilterType,
    pub cutoff_hz: f32,
    #[serde(default)]
    pub resonance: f32,
}

impl Patch {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let patch: Self = serde_yaml::from_str(source)?;
        patch.validate()?;
        Ok(patch)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let patch: Self = serde_json::from_str(source)?;
        patch.validate()?;
        Ok(patch)
    }

    /// Reject patches that would render silence or garbage.
    pub fn validate(&self) -> Result<()> {
        let invalid = |why: &str| ChordsError::Instrument(format!("patch '{}': {why}", self.name));

        if self.layers.is_empty() {
            return Err(invalid("no layers"));
        }
        for layer in &self.layers {
            if layer.oscillators.is_empty() {
                return Err(invalid("layer without oscillators"));
            }
            if !layer.gain.is_finite() {
                return Err(invalid("layer gain must be finite"));
            }
            if layer
                .oscillators
                .iter()
                .any(|osc| !(osc.gain.is_finite() && osc.detune_cents.is_finite()))
            {
                return Err(invalid("oscillator gain and detune must be finite"));
            }
            let env = &layer.envelope;
            if [env.attack_ms, env.decay_ms, env.release_ms]
                .iter()
                .any(|t| !t.is_finite() || *t < 0.0)
            {
                return Err(invalid("envelope times must be finite and non-negative"));
            }
            if !(0.0..=1.0).contains(&env.sustain_level) {
                return Err(invalid("sustain level must be within 0..=1"));
            }
            if let Some(filter) = &layer.filter {
                if !(filter.cutoff_hz.is_finite() && filter.cutoff_hz > 0.0) {
                    return Err(invalid("filter cutoff must be positive"));
                }
                if !filter.resonance.is_finite() {
                    return Err(invalid("filter resonance must be finite"));
                }
            }
        }
        Ok(())
    }

    /// Build one voice graph. Layers are mixed with equal weight.
    pub fn build_voice(&self) -> Box<dyn GraphNode> {
        let mut layers = self.layers.iter().map(build_layer);
        let Some(first) = layers.next() else {
            return OscNode::sine()
                .with_gain(0.0)
                .amplify(EnvNode::adsr(0.0, 0.0, 0.0, 0.0))
                .boxed();
        };

        layers
            .enumerate()
            .fold(first, |acc, (i, layer)| acc.mix(layer, 1.0 / (i as f32 + 2.0)).boxed())
    }
}

fn build_layer(layer: &VoiceLayer) -> Box<dyn GraphNode> {
    let mut oscillators = layer.oscillators.iter().map(|osc| {
        OscNode::new(osc.waveform)
            .with_detune(osc.detune_cents)
            .with_gain(osc.gain * layer.gain)
            .boxed()
    });
    let first = oscillators
        .next()
        .unwrap_or_else(|| OscNode::sine().with_gain(0.0).boxed());
    let stack = oscillators
        .enumerate()
        .fold(first, |acc, (i, osc)| acc.mix(osc, 1.0 / (i as f32 + 2.0)).boxed());

    let env = &layer.envelope;
    let shaped = stack.amplify(EnvNode::from_envelope(Envelope::from_millis(
        env.attack_ms,
        env.decay_ms,
        env.sustain_level,
        env.release_ms,
    )));

    match &layer.filter {
        Some(filter) => shaped
            .through(FilterNode::new(
                filter.filter_type,
                filter.cutoff_hz,
                filter.resonance,
            ))
            .boxed(),
        None => shaped.boxed(),
    }
}

impl VoiceFactory for Patch {
    type Voice = Box<dyn GraphNode>;

    fn create_voice(&self) -> Self::Voice {
        self.build_voice()
    }
}
