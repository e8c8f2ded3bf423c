//! Block-rate modulation helpers.

/*
The graph's Modulate combinator updates its target parameter once per block
rather than once per sample: the LFO is rendered into a scratch buffer, the
buffer is averaged, and the average drives the parameter for the whole block.

For the modulators in this crate that tradeoff is free. Block sizes are a few
milliseconds and the bed LFOs complete a cycle in 8-30 seconds, so the LFO is
essentially constant within any one block. Only the flutter buzz (8-20 Hz)
moves fast enough to care, and that one is applied per-sample through Amplify
rather than through Modulate.
*/

/// Average of a block of samples; the block-rate stand-in for a control signal.
#[inline]
pub fn block_average(block: &[f32]) -> f32 {
    if block.is_empty() {
        return 0.0;
    }
    block.iter().sum::<f32>() / block.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_constant_block() {
        let block = [0.25f32; 64];
        assert!((block_average(&block) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn average_of_empty_block_is_zero() {
        assert_eq!(block_average(&[]), 0.0);
    }

    #[test]
    fn slow_lfo_is_nearly_constant_within_a_block() {
        use crate::dsp::oscillator::SineBlock;
        use crate::graph::node::RenderCtx;

        let ctx = RenderCtx::new(48_000.0);
        let mut lfo = SineBlock::new(0.08);
        let mut block = vec![0.0f32; 256];
        lfo.render(&mut block, &ctx);

        let spread = block
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        assert!(spread.1 - spread.0 < 0.01, "spread {:?}", spread);
    }
}
