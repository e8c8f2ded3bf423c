use crate::dsp::oscillator::NoiseTable;
use crate::events::{EventKind, EventSpec};
use crate::graph::{FilterNode, FilterParam, LfoNode, NodeExt, NoiseNode};
use crate::scenes::{Mode, Scene};

/// Open meadow: a brighter wind than the forest (500 Hz cutoff, same ±80 Hz
/// gusts) and the busiest event roster - butterflies most often, crickets
/// reliably, a distant chirp now and then.
pub(crate) fn build(noise: &NoiseTable) -> Scene {
    let wind = NoiseNode::looped(noise.clone()).through(
        FilterNode::low_pass(500.0).modulate(LfoNode::sine(0.04), FilterParam::Cutoff, 80.0),
    );

    Scene {
        mode: Mode::Meadow,
        layers: vec![Box::new(wind)],
        events: vec![
            EventSpec::new(EventKind::Flutter, Mode::Meadow, 3.0..=5.0, 0.4),
            EventSpec::new(EventKind::Cricket, Mode::Meadow, 5.0..=7.0, 0.6),
            EventSpec::new(EventKind::Chirp, Mode::Meadow, 7.0..=9.0, 0.3),
        ],
    }
}
