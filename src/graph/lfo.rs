use crate::dsp::lfo::bipolar_to_unipolar;
use crate::dsp::oscillator::SineBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/// Control-rate sine, rendered into a buffer like any other node.
///
/// `sine` is bipolar (-1..+1) for modulating a parameter around its base
/// value. `tremolo` is unipolar (0..1) for multiplying straight into a
/// signal path; the butterfly flutter runs one at 8-20 Hz through
/// `.amplify()` to get its wing buzz.
pub struct LfoNode {
    osc: SineBlock,
    unipolar: bool,
}

impl LfoNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: SineBlock::new(frequency),
            unipolar: false,
        }
    }

    pub fn tremolo(frequency: f32) -> Self {
        Self {
            osc: SineBlock::new(frequency),
            unipolar: true,
        }
    }
}

impl GraphNode for LfoNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, ctx);
        if self.unipolar {
            for sample in out.iter_mut() {
                *sample = bipolar_to_unipolar(*sample);
            }
        }
    }
}
