use crate::dsp::filter::{FilterType, SVFilter};
use crate::graph::node::{GraphNode, RenderCtx};

/// In-place filter stage, used on the effect side of `.through()`.
pub struct FilterNode {
    filter: SVFilter,
}

impl FilterNode {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, resonance: f32) -> Self {
        Self {
            filter: SVFilter::new(filter_type, cutoff_hz, resonance),
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::lowpass(cutoff_hz),
        }
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::highpass(cutoff_hz),
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.filter.reset();
    }

    // A filter never keeps a voice alive on its own
    fn is_active(&self) -> bool {
        false
    }
}
