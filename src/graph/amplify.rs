use crate::graph::node::{GraphNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Amplify
=======

Sample-accurate multiplication of two signals. This is how every one-shot
gets its shape (source × envelope) and how the flutter gets its buzz
(source × 8-20 Hz tremolo):

  OscNode::sine(4_000.0).amplify(EnvNode::new(0.0, pulse_segments()))

Liveness is the AND of both sides: a voice whose envelope has finished is
done even though its oscillator could run forever. That single rule is what
lets the engine retire one-shots - it polls `is_active()` after each block
and drops anything that reports false.

The modulator renders into a fixed scratch buffer, so blocks longer than
MAX_BLOCK_SIZE are processed in chunks rather than allocating.
*/

pub struct Amplify<S, M> {
    source: S,
    modulator: M,
    scratch: Box<[f32; MAX_BLOCK_SIZE]>,
}

impl<S: GraphNode, M: GraphNode> Amplify<S, M> {
    pub fn new(source: S, modulator: M) -> Self {
        Self {
            source,
            modulator,
            scratch: Box::new([0.0; MAX_BLOCK_SIZE]),
        }
    }
}

impl<S: GraphNode, M: GraphNode> GraphNode for Amplify<S, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.source.render_block(chunk, ctx);

            let scratch = &mut self.scratch[..chunk.len()];
            self.modulator.render_block(scratch, ctx);

            for (sample, level) in chunk.iter_mut().zip(scratch.iter()) {
                *sample *= *level;
            }
        }
    }

    fn is_active(&self) -> bool {
        self.source.is_active() && self.modulator.is_active()
    }
}
