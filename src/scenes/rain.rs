use crate::dsp::oscillator::NoiseTable;
use crate::graph::{FilterNode, NodeExt, NoiseNode};
use crate::scenes::{Mode, Scene};

/// Rain is band-limited noise: a 700 Hz low-pass takes the hiss off the top
/// and a 150 Hz high-pass keeps low-frequency rumble out of the bed.
pub(crate) fn build(noise: &NoiseTable) -> Scene {
    Scene {
        mode: Mode::Rain,
        layers: vec![Box::new(
            NoiseNode::looped(noise.clone())
                .through(FilterNode::low_pass(700.0))
                .through(FilterNode::high_pass(150.0)),
        )],
        events: Vec::new(),
    }
}
