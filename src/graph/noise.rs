use crate::dsp::oscillator::{NoiseBlock, NoiseTable};
use crate::graph::node::{GraphNode, RenderCtx};

/// Looped white-noise source reading a shared table.
///
/// The engine generates one table at startup; every layer that needs noise
/// gets a cheap clone. Layers within one scene therefore read equivalent
/// noise (the forest wind bed and its water layer share a table), matching
/// how the beds are meant to blend.
pub struct NoiseNode {
    block: NoiseBlock,
}

impl NoiseNode {
    pub fn looped(table: NoiseTable) -> Self {
        Self {
            block: NoiseBlock::new(table),
        }
    }
}

impl GraphNode for NoiseNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.block.render(out);
    }
}
