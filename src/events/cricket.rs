use rand::Rng;

use crate::dsp::envelope::Segment;
use crate::graph::{EnvNode, GraphNode, NodeExt, OscNode};

/// Soft cricket: 2-4 pulses of a ~4 kHz sine, 20 ms attack / 40 ms release
/// at gain 0.005, one pulse every 100 ms. The whole train is a single
/// oscillator gated by one multi-segment envelope.
pub fn spawn<R: Rng>(rng: &mut R) -> Vec<Box<dyn GraphNode>> {
    let pulses = rng.gen_range(2..=4);
    let frequency = rng.gen_range(4_000.0..=4_300.0);

    let mut segments = Vec::with_capacity(pulses * 3);
    for _ in 0..pulses {
        segments.push(Segment::linear(0.005, 0.02));
        segments.push(Segment::linear(0.0, 0.04));
        segments.push(Segment::hold(0.04));
    }

    vec![Box::new(
        OscNode::sine(frequency).amplify(EnvNode::new(0.0, segments)),
    )]
}
