use crate::dsp::oscillator::SineBlock;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/*
Sine Oscillator Node
====================

Every pitched sound in the crate is a sine: drone voices, bird chirps,
cricket pulses, chime notes. Nothing here tracks a keyboard - each OscNode
is built with the one frequency it will play (possibly swept, for chirps),
which is why the constructor takes the frequency directly.

  // Drone voice at F3
  let voice = OscNode::sine(174.61);

  // Bird chirp: 1.8 kHz sweeping up 400 Hz over 150 ms
  let burst = OscNode::sine(1_800.0).with_sweep(2_200.0, 0.15);

The frequency is modulatable for the music bed, whose voices drift ±2 Hz
under a slow LFO:

  OscNode::sine(110.0).modulate(LfoNode::sine(0.15), OscParam::Frequency, 2.0)
*/

pub struct OscNode {
    osc: SineBlock,
    base_frequency: f32,
}

/// Parameters that can be modulated on an oscillator
#[derive(Clone, Copy, Debug)]
pub enum OscParam {
    /// Oscillator frequency in Hz
    Frequency,
}

impl OscNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: SineBlock::new(frequency),
            base_frequency: frequency,
        }
    }

    /// Sweep exponentially to `target_hz` over `seconds`, starting at the
    /// first rendered sample. Used by chirp one-shots.
    pub fn with_sweep(mut self, target_hz: f32, seconds: f32) -> Self {
        self.osc.set_sweep(target_hz, seconds);
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, ctx);
    }
}

impl Modulatable for OscNode {
    type Param = OscParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            OscParam::Frequency => self.base_frequency,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            OscParam::Frequency => {
                // Clamp to audible range (20 Hz - 20 kHz)
                self.osc
                    .set_frequency((base + modulation).clamp(20.0, 20_000.0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn valid_sine() {
        let sample_rate = 48_000.0;
        let frequency = 220.0;
        let ctx = RenderCtx::new(sample_rate);
        let mut node = OscNode::sine(frequency);

        let mut buffer = vec![0.0f32; 128];
        node.render_block(&mut buffer, &ctx);

        let sample_index = 24;
        let expected = (TAU * frequency * sample_index as f32 / sample_rate).sin();
        let actual = buffer[sample_index];
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn modulation_moves_frequency_from_base() {
        let mut node = OscNode::sine(110.0);
        assert_eq!(node.get_param(OscParam::Frequency), 110.0);

        node.apply_modulation(OscParam::Frequency, 110.0, 2.0);
        // Base is preserved for the next modulation pass.
        assert_eq!(node.get_param(OscParam::Frequency), 110.0);
    }

    #[test]
    fn modulation_clamps_to_audible_range() {
        let ctx = RenderCtx::new(48_000.0);
        let mut node = OscNode::sine(110.0);
        node.apply_modulation(OscParam::Frequency, 110.0, -10_000.0);

        let mut buffer = vec![0.0f32; 256];
        node.render_block(&mut buffer, &ctx);
        for &sample in &buffer {
            assert!(sample.is_finite());
        }
    }
}
