use crate::graph::node::{GraphNode, RenderCtx};

/// Silence for a fixed lead-in, then the inner node.
///
/// This is how the second chirp of a pair and the second chime note are
/// offset in time: the whole voice is spawned at once, and the later part
/// simply starts rendering 300 ms (or 100 ms) in.
pub struct Onset<N> {
    inner: N,
    delay_seconds: f32,
    // Derived on first render, once the sample rate is known.
    remaining: Option<usize>,
}

impl<N: GraphNode> Onset<N> {
    pub fn new(delay_seconds: f32, inner: N) -> Self {
        Self {
            inner,
            delay_seconds,
            remaining: None,
        }
    }
}

impl<N: GraphNode> GraphNode for Onset<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let remaining = self
            .remaining
            .get_or_insert((self.delay_seconds.max(0.0) * ctx.sample_rate) as usize);

        let lead = (*remaining).min(out.len());
        out[..lead].fill(0.0);
        *remaining -= lead;

        if lead < out.len() {
            self.inner.render_block(&mut out[lead..], ctx);
        }
    }

    fn is_active(&self) -> bool {
        // Not yet started counts as active; the voice is still coming.
        self.remaining.map_or(true, |r| r > 0) || self.inner.is_active()
    }
}
