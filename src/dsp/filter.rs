use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/// Responses available from the state-variable filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

/// Trapezoidal state-variable filter.
///
/// All four responses come out of the same two integrators; `filter_type`
/// only picks which one is written back.
pub struct SVFilter {
    ic1eq: f32,
    ic2eq: f32,
    cutoff_hz: f32,
    resonance: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, resonance: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: resonance.clamp(0.0, 0.99),
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, 0.0)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz, 0.0)
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        // Keep the cutoff below Nyquist or tan() blows up
        let cutoff = self.cutoff_hz.clamp(10.0, ctx.sample_rate * 0.49);
        let g = (PI * cutoff / ctx.sample_rate).tan();
        let k = 2.0 - 2.0 * self.resonance;
        let h = 1.0 / (1.0 + g * (g + k));

        for sample in buffer.iter_mut() {
            let input = *sample;
            let v3 = input - self.ic2eq;
            let v1 = h * (self.ic1eq + g * v3);
            let v2 = self.ic2eq + g * v1;
            self.ic1eq = 2.0 * v1 - self.ic1eq;
            self.ic2eq = 2.0 * v2 - self.ic2eq;

            *sample = match self.filter_type {
                FilterType::LowPass => v2,
                FilterType::HighPass => input - k * v1 - v2,
                FilterType::BandPass => v1,
                FilterType::Notch => input - k * v1,
            };
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
