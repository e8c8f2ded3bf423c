use crate::dsp::filter::SVFilter;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/*
Filter Node
===========

Every ambience bed is shaped noise, and the shaping is a single filter pass:

  mode      filter
  ------    ----------------
  rain      HP 150 -> LP 700
  waves     LP 300
  forest    LP 300 (wind), LP 400 (water)
  meadow    LP 500
  flutter   HP 4000

The cutoff is modulatable so the forest wind can breathe - its LP cutoff
drifts ±80 Hz under a 0.04 Hz LFO:

  NoiseNode::looped(table)
      .through(FilterNode::low_pass(300.0)
          .modulate(LfoNode::sine(0.04), FilterParam::Cutoff, 80.0))
*/

pub struct FilterNode {
    filter: SVFilter,
    base_cutoff: f32,
}

/// Parameters that can be modulated on a filter
#[derive(Clone, Copy, Debug)]
pub enum FilterParam {
    /// Cutoff frequency in Hz
    Cutoff,
}

impl FilterNode {
    pub fn low_pass(cutoff: f32) -> Self {
        Self {
            filter: SVFilter::lowpass(cutoff),
            base_cutoff: cutoff,
        }
    }

    pub fn high_pass(cutoff: f32) -> Self {
        Self {
            filter: SVFilter::highpass(cutoff),
            base_cutoff: cutoff,
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx);
    }
}

impl Modulatable for FilterNode {
    type Param = FilterParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FilterParam::Cutoff => self.base_cutoff,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            FilterParam::Cutoff => {
                self.filter
                    .set_cutoff((base + modulation).clamp(20.0, 20_000.0));
            }
        }
    }
}
