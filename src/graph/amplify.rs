use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a modulator, typically an oscillator by an envelope.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        // Scratch space is MAX_BLOCK_SIZE long; longer blocks go in pieces
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.signal.render_block(block, ctx);

            let gain = &mut self.temp_buffer[..block.len()];
            gain.fill(0.0);
            self.modulator.render_block(gain, ctx);

            for (o, g) in block.iter_mut().zip(gain.iter()) {
                *o *= *g;
            }
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.signal.note_off(ctx);
        self.modulator.note_off(ctx);
    }

    // The envelope decides when an enveloped oscillator falls silent
    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}
