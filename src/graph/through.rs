use crate::graph::node::{GraphNode, RenderCtx};

/// Serial chain: render the source, then let the effect process the buffer
/// in place. Built with `NodeExt::through`.
pub struct Through<S, E> {
    source: S,
    effect: E,
}

impl<S: GraphNode, E: GraphNode> Through<S, E> {
    pub fn new(source: S, effect: E) -> Self {
        Self { source, effect }
    }
}

impl<S: GraphNode, E: GraphNode> GraphNode for Through<S, E> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
