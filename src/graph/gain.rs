use crate::dsp::ramp::ValueRamp;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/// Gain stage: multiplies the buffer in place by a slewed level.
///
/// Bed layers sit behind a fixed gain that an LFO breathes around
/// (`GainParam::Level`); the music bed uses `with_ramp` for its entrance.
pub struct GainNode {
    level: ValueRamp,
    base_level: f32,
    // Started on the first rendered block, once the sample rate is known.
    pending_ramp: Option<(f32, f32)>,
}

/// Parameters that can be modulated on a gain stage
#[derive(Clone, Copy, Debug)]
pub enum GainParam {
    /// Linear gain level
    Level,
}

impl GainNode {
    pub fn fixed(level: f32) -> Self {
        Self {
            level: ValueRamp::new(level),
            base_level: level,
            pending_ramp: None,
        }
    }

    /// Start from the current level and ramp linearly to `target` over
    /// `seconds`, beginning at the first rendered sample.
    pub fn with_ramp(mut self, target: f32, seconds: f32) -> Self {
        self.pending_ramp = Some((target, seconds));
        self.base_level = target;
        self
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if let Some((target, seconds)) = self.pending_ramp.take() {
            self.level.ramp_to(target, seconds, ctx.sample_rate);
        }
        for sample in out.iter_mut() {
            *sample *= self.level.next_sample();
        }
    }
}

impl Modulatable for GainNode {
    type Param = GainParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            GainParam::Level => self.base_level,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            GainParam::Level => {
                self.level.set((base + modulation).max(0.0));
            }
        }
    }
}
