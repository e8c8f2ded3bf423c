use crate::dsp::oscillator::NoiseTable;
use crate::events::{EventKind, EventSpec};
use crate::graph::{FilterNode, FilterParam, GainNode, GainParam, LfoNode, NodeExt, NoiseNode};
use crate::scenes::{Mode, Scene};

/*
Forest
======

Two continuous layers over the same noise table:

  wind    noise -> LP 300 Hz, cutoff drifting ±80 Hz at 0.04 Hz. The gusts
          are spectral, not loudness: what changes is how much of the noise
          gets through.

  brook   noise -> LP 400 Hz -> gain 0.08 rippling ±0.05 at 1.5 Hz. The fast
          ripple on a quiet layer is what reads as running water.

Plus a chirp scheduler: a check every 4-6 s, half of which fire.
*/

pub(crate) fn build(noise: &NoiseTable) -> Scene {
    let wind = NoiseNode::looped(noise.clone()).through(
        FilterNode::low_pass(300.0).modulate(LfoNode::sine(0.04), FilterParam::Cutoff, 80.0),
    );

    let brook = NoiseNode::looped(noise.clone())
        .through(FilterNode::low_pass(400.0))
        .through(GainNode::fixed(0.08).modulate(LfoNode::sine(1.5), GainParam::Level, 0.05));

    Scene {
        mode: Mode::Forest,
        layers: vec![Box::new(wind), Box::new(brook)],
        events: vec![EventSpec::new(
            EventKind::Chirp,
            Mode::Forest,
            4.0..=6.0,
            0.5,
        )],
    }
}
