use crate::dsp::envelope::{Segment, SegmentEnv};
use crate::graph::node::{GraphNode, RenderCtx};

/// Breakpoint envelope as a control signal.
///
/// One-shot recipes pair an EnvNode with their source through `.amplify()`;
/// when the envelope finishes, the whole voice reports inactive and the
/// engine drops it on the next block.
pub struct EnvNode {
    env: SegmentEnv,
}

impl EnvNode {
    pub fn new(start_level: f32, segments: Vec<Segment>) -> Self {
        Self {
            env: SegmentEnv::new(start_level, segments),
        }
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx);
    }

    fn is_active(&self) -> bool {
        !self.env.is_finished()
    }
}
