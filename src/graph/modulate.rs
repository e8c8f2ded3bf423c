use crate::dsp::modulate::block_average;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Modulate
========

Connects a modulation source to a parameter of a target node:

  FilterNode::low_pass(300.0)
      .modulate(LfoNode::sine(0.04), FilterParam::Cutoff, 80.0)

Per block, the modulator is rendered into a scratch buffer, averaged, scaled
by `depth`, and applied relative to the base value captured at construction:

  effective = base + depth · avg(modulator block)

Block-rate is accurate enough here because the bed modulators run at
0.03-1.5 Hz, far below any block boundary (see dsp/modulate.rs for the
numbers). Fast amplitude modulation goes through Amplify instead.
*/

pub struct Modulate<N: Modulatable, M> {
    node: N,
    modulator: M,
    param: N::Param,
    depth: f32,
    base: f32,
    scratch: Box<[f32; MAX_BLOCK_SIZE]>,
}

impl<N, M> Modulate<N, M>
where
    N: GraphNode + Modulatable,
    M: GraphNode,
{
    pub fn new(node: N, modulator: M, param: N::Param, depth: f32) -> Self {
        let base = node.get_param(param);
        Self {
            node,
            modulator,
            param,
            depth,
            base,
            scratch: Box::new([0.0; MAX_BLOCK_SIZE]),
        }
    }
}

impl<N, M> GraphNode for Modulate<N, M>
where
    N: GraphNode + Modulatable,
    M: GraphNode,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let scratch = &mut self.scratch[..chunk.len()];
            self.modulator.render_block(scratch, ctx);

            let modulation = self.depth * block_average(scratch);
            self.node.apply_modulation(self.param, self.base, modulation);
            self.node.render_block(chunk, ctx);
        }
    }

    fn is_active(&self) -> bool {
        self.node.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::extensions::NodeExt;
    use crate::graph::gain::{GainNode, GainParam};
    use crate::graph::lfo::LfoNode;

    #[test]
    fn slow_lfo_swings_the_gain_around_its_base() {
        let ctx = RenderCtx::new(1_000.0);
        // 1 Hz LFO at 1 kHz: quarter cycle per 250 samples.
        let mut gain = GainNode::fixed(0.2).modulate(LfoNode::sine(1.0), GainParam::Level, 0.15);

        // First quarter cycle: LFO rising from 0 to +1, gain should sit above base.
        let mut buffer = vec![1.0f32; 250];
        gain.render_block(&mut buffer, &ctx);
        let late = buffer[249];
        assert!(late > 0.2, "gain should swell above base, got {late}");
        assert!(late <= 0.35 + 1e-4, "gain exceeded base + depth: {late}");
    }

    #[test]
    fn zero_depth_leaves_the_base_untouched() {
        let ctx = RenderCtx::new(1_000.0);
        let mut gain = GainNode::fixed(0.2).modulate(LfoNode::sine(5.0), GainParam::Level, 0.0);

        let mut buffer = vec![1.0f32; 128];
        gain.render_block(&mut buffer, &ctx);
        for &sample in &buffer {
            assert!((sample - 0.2).abs() < 1e-6);
        }
    }
}
