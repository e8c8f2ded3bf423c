use crate::dsp::oscillator::NoiseTable;
use crate::graph::{FilterNode, GainNode, GainParam, LfoNode, NodeExt, NoiseNode};
use crate::scenes::{Mode, Scene};

/// Ocean swell: noise under a 300 Hz low-pass, with the bed gain breathing
/// around 0.2 at one swell every 12.5 s (0.08 Hz, depth 0.15).
pub(crate) fn build(noise: &NoiseTable) -> Scene {
    Scene {
        mode: Mode::Waves,
        layers: vec![Box::new(
            NoiseNode::looped(noise.clone())
                .through(FilterNode::low_pass(300.0))
                .through(
                    GainNode::fixed(0.2).modulate(LfoNode::sine(0.08), GainParam::Level, 0.15),
                ),
        )],
        events: Vec::new(),
    }
}
