use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Parallel Signal Mixing
======================

output = A * (1 - balance) + B * balance

Linear crossfade: balance 0.0 is all A, 1.0 is all B, 0.5 is both at half
amplitude. Patches stack oscillator layers with it by folding, giving the
n-th layer a balance of 1/n so every layer ends up with equal weight.

Both sources receive note_on/note_off. Apply an envelope AFTER mixing if it
should gate both:

  osc1.mix(osc2, 0.5).amplify(env)
*/

pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    pub balance: f32,
    temp_buffer: Vec<f32>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B, balance: f32) -> Self {
        Mix {
            source_a,
            source_b,
            balance: balance.clamp(0.0, 1.0),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Mix<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let weight_a = 1.0 - self.balance;
        let weight_b = self.balance;

        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.source_a.render_block(block, ctx);

            let frames = &mut self.temp_buffer[..block.len()];
            frames.fill(0.0);
            self.source_b.render_block(frames, ctx);

            for (o, b) in block.iter_mut().zip(frames.iter()) {
                *o = (*o * weight_a) + (*b * weight_b);
            }
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source_a.note_on(ctx);
        self.source_b.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source_a.note_off(ctx);
        self.source_b.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source_a.is_active() || self.source_b.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::oscillator::OscNode;

    #[test]
    fn balance_weights_sources() {
        let ctx = RenderCtx::from_freq(1_000.0, 100.0, 100.0);
        // Square starts high, so the first sample is 1.0 * gain for each side
        let mut mix = Mix::new(
            OscNode::square(),
            OscNode::square().with_gain(0.0),
            0.25,
        );
        let mut buffer = vec![0.0f32; 4];
        mix.render_block(&mut buffer, &ctx);
        assert!((buffer[0] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn accepts_blocks_longer_than_scratch() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 100.0);
        let mut mix = Mix::new(OscNode::sine(), OscNode::square(), 0.5);
        let mut buffer = vec![0.0f32; MAX_BLOCK_SIZE * 3];
        mix.render_block(&mut buffer, &ctx);
        assert!(buffer[MAX_BLOCK_SIZE * 2..].iter().any(|s| s.abs() > 0.1));
    }
}
