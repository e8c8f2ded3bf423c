use crate::graph::amplify::Amplify;
use crate::graph::modulate::Modulate;
use crate::graph::node::{GraphNode, Modulatable};
use crate::graph::through::Through;

/*
Fluent Graph Construction
=========================

Scene recipes read top to bottom as signal flow, left to right as plumbing:

  NoiseNode::looped(table)
      .through(FilterNode::low_pass(300.0)
          .modulate(LfoNode::sine(0.04), FilterParam::Cutoff, 80.0))
      .through(GainNode::fixed(0.2)
          .modulate(LfoNode::sine(0.08), GainParam::Level, 0.15))

Three verbs cover every recipe in scenes/ and events/:

  .through(effect)              source feeds the effect (filter, gain)
  .amplify(modulator)           multiply per-sample (envelopes, tremolo)
  .modulate(lfo, param, depth)  drive a parameter at block rate
*/

pub trait NodeExt: GraphNode + Sized {
    fn through<E: GraphNode>(self, effect: E) -> Through<Self, E> {
        Through::new(self, effect)
    }

    fn amplify<M: GraphNode>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }

    fn modulate<M: GraphNode>(
        self,
        modulator: M,
        param: Self::Param,
        depth: f32,
    ) -> Modulate<Self, M>
    where
        Self: Modulatable,
    {
        Modulate::new(self, modulator, param, depth)
    }
}

impl<T: GraphNode + Sized> NodeExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::filter::{FilterNode, FilterParam};
    use crate::graph::gain::{GainNode, GainParam};
    use crate::graph::lfo::LfoNode;
    use crate::graph::node::RenderCtx;
    use crate::graph::noise::NoiseNode;
    use crate::dsp::oscillator::NoiseTable;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn full_bed_recipe_renders_bounded_audio() {
        let mut rng = Pcg32::seed_from_u64(3);
        let table = NoiseTable::generate(&mut rng, 8_192);

        // Ocean-style bed: filtered noise with a slow gain swell.
        let mut bed = NoiseNode::looped(table)
            .through(
                FilterNode::low_pass(300.0).modulate(
                    LfoNode::sine(0.04),
                    FilterParam::Cutoff,
                    80.0,
                ),
            )
            .through(GainNode::fixed(0.2).modulate(LfoNode::sine(0.08), GainParam::Level, 0.15));

        let ctx = RenderCtx::new(48_000.0);
        let mut buffer = vec![0.0f32; 4_096];
        bed.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().any(|s| s.abs() > 1e-4), "bed is silent");
        for &sample in &buffer {
            assert!(sample.abs() <= 0.4, "bed sample out of range: {sample}");
        }
        assert!(bed.is_active());
    }
}
